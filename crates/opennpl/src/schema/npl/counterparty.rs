use super::choices::{CrossCollateralisation, CrossDefault, EntityType};
use super::{Portfolio, PortfolioSnapshot};
use crate::schema::{Column, Entity, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Connected borrowers sharing cross-default or cross-collateral clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyGroup {
    pub counterparty_group_identifier: Option<String>,
    pub portfolio_id: Option<i64>,
    pub snapshot_id: Option<i64>,
    pub name_of_counterparty_group: Option<String>,
    pub cross_collateralisation_in_counterparty_group: Option<CrossCollateralisation>,
    pub cross_default_in_counterparty_group: Option<CrossDefault>,
    pub description_of_cross_collateralisation: Option<String>,
    pub description_of_cross_default: Option<String>,
    pub industry_segment_of_counterparty_group: Option<String>,
    pub name_of_sponsor: Option<String>,
    pub type_of_sponsor: Option<EntityType>,
    pub description_of_sponsor: Option<String>,
}

impl Entity for CounterpartyGroup {
    const TABLE: &'static str = "npl_counterparty_group";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "counterparty_groups";
    const LABEL: &'static str = "Counterparty Group";
    const NATURAL_KEY: Option<&'static str> = Some("counterparty_group_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("counterparty_group_identifier").required(),
        Column::foreign_key("portfolio_id", Portfolio::TABLE),
        Column::foreign_key("snapshot_id", PortfolioSnapshot::TABLE),
        Column::text("name_of_counterparty_group"),
        Column::choice(
            "cross_collateralisation_in_counterparty_group",
            &CrossCollateralisation::SET,
        ),
        Column::choice("cross_default_in_counterparty_group", &CrossDefault::SET),
        Column::text("description_of_cross_collateralisation"),
        Column::text("description_of_cross_default"),
        Column::text("industry_segment_of_counterparty_group"),
        Column::text("name_of_sponsor"),
        Column::choice("type_of_sponsor", &EntityType::SET),
        Column::text("description_of_sponsor"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.counterparty_group_identifier.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counterparty {
    pub counterparty_identifier: Option<String>,
    pub counterparty_group_id: Option<i64>,
    pub portfolio_id: Option<i64>,
    pub snapshot_id: Option<i64>,
    pub registration_number: Option<String>,
    pub legal_entity_identifier: Option<String>,
    pub country_of_residence: Option<String>,
    pub date_of_incorporation: Option<NaiveDate>,
    pub occupation_description: Option<String>,
    pub business_description: Option<String>,
    pub current_internal_credit_rating: Option<String>,
    pub annual_revenue: Option<f64>,
    pub total_debt: Option<f64>,
    pub legal_fees_accrued: Option<f64>,
    pub in_insolvency: Option<bool>,
}

impl Entity for Counterparty {
    const TABLE: &'static str = "npl_counterparty";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "counterparties";
    const LABEL: &'static str = "Counterparty";
    const NATURAL_KEY: Option<&'static str> = Some("counterparty_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("counterparty_identifier").required(),
        Column::foreign_key("counterparty_group_id", CounterpartyGroup::TABLE),
        Column::foreign_key("portfolio_id", Portfolio::TABLE),
        Column::foreign_key("snapshot_id", PortfolioSnapshot::TABLE),
        Column::text("registration_number"),
        Column::text("legal_entity_identifier"),
        Column::text("country_of_residence"),
        Column::date("date_of_incorporation"),
        Column::text("occupation_description"),
        Column::text("business_description"),
        Column::text("current_internal_credit_rating"),
        Column::real("annual_revenue"),
        Column::real("total_debt"),
        Column::real("legal_fees_accrued"),
        Column::flag("in_insolvency"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.counterparty_identifier.as_deref()
    }
}
