use super::choices::{OccupancyStatus, PropertyType, PropertyValuationMethod};
use super::{Loan, PortfolioSnapshot};
use crate::schema::{Column, Entity, Template};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCollateral {
    pub loan_id: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub number_of_units: Option<i64>,
    pub occupancy_status: Option<OccupancyStatus>,
    pub property_state: Option<String>,
    pub metropolitan_statistical_area: Option<String>,
    pub zip_code_short: Option<String>,
}

impl Entity for PropertyCollateral {
    const TABLE: &'static str = "sflp_property_collateral";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "property_collateral";
    const LABEL: &'static str = "Property Collateral";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("loan_id", Loan::TABLE).required(),
        Column::choice("property_type", &PropertyType::SET),
        Column::integer("number_of_units"),
        Column::choice("occupancy_status", &OccupancyStatus::SET),
        Column::text("property_state"),
        Column::text("metropolitan_statistical_area"),
        Column::text("zip_code_short"),
    ];
}

/// Holding costs and valuation of the property for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCollateralState {
    pub property_collateral_id: Option<i64>,
    pub portfolio_snapshot_id: Option<i64>,
    pub property_preservation_and_repair_costs: Option<f64>,
    pub miscellaneous_holding_expenses_and_credits: Option<f64>,
    pub associated_taxes_for_holding_property: Option<f64>,
    pub property_valuation_method: Option<PropertyValuationMethod>,
}

impl Entity for PropertyCollateralState {
    const TABLE: &'static str = "sflp_property_collateral_state";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "property_collateral_states";
    const LABEL: &'static str = "Property Collateral State";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("property_collateral_id", PropertyCollateral::TABLE).required(),
        Column::foreign_key("portfolio_snapshot_id", PortfolioSnapshot::TABLE),
        Column::real("property_preservation_and_repair_costs"),
        Column::real("miscellaneous_holding_expenses_and_credits"),
        Column::real("associated_taxes_for_holding_property"),
        Column::choice("property_valuation_method", &PropertyValuationMethod::SET),
    ];
}
