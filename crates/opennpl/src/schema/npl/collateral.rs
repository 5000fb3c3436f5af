use super::choices::{
    AreaType, CollateralType, ConditionOfProperty, EnergyPerformanceCertificate, EntityType,
    GeographicRegionClassification, InternalOrExternal, NewOrUsed, PartyLiableForVat,
    PurposeOfProperty, SectorOfProperty, Tenure, TypeOfOccupancy, TypeOfProperty, ValuationType,
};
use super::Loan;
use crate::schema::{Column, Entity, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Real estate securing a loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCollateral {
    pub protection_identifier: Option<String>,
    pub loan_id: Option<i64>,
    pub address_of_property: Option<String>,
    pub city_of_property: Option<String>,
    pub property_postcode: Option<String>,
    pub property_country: Option<String>,
    pub area_type_of_property: Option<AreaType>,
    pub sector_of_property: Option<SectorOfProperty>,
    pub type_of_property: Option<TypeOfProperty>,
    pub type_of_occupancy: Option<TypeOfOccupancy>,
    pub purpose_of_property: Option<PurposeOfProperty>,
    pub condition_of_property: Option<ConditionOfProperty>,
    pub tenure: Option<Tenure>,
    pub building_area_m2: Option<f64>,
    pub land_area_m2: Option<f64>,
    pub number_of_rooms: Option<f64>,
    pub currency_of_property: Option<String>,
    pub initial_valuation_amount: Option<f64>,
    pub date_of_initial_valuation: Option<NaiveDate>,
    pub latest_valuation_amount: Option<f64>,
    pub date_of_latest_valuation: Option<NaiveDate>,
    pub type_of_latest_valuation: Option<ValuationType>,
    pub current_annual_passing_rent: Option<f64>,
    pub enforcement_status: Option<bool>,
    pub year_of_construction: Option<NaiveDate>,
    pub amount_of_vat_payable: Option<f64>,
    pub building_area_m2_lettable: Option<f64>,
    pub building_area_m2_occupied: Option<f64>,
    pub completion_of_property: Option<bool>,
    pub current_net_operating_income: Option<f64>,
    pub current_opex_and_overheads: Option<f64>,
    pub enforcement_description: Option<String>,
    pub enforcement_status_third_parties: Option<bool>,
    pub estimated_annual_void_cost: Option<f64>,
    pub estimated_rental_void: Option<f64>,
    pub geographic_region_classification: Option<GeographicRegionClassification>,
    pub geographic_region_of_property: Option<String>,
    pub initial_estimated_rental_value: Option<f64>,
    pub internal_or_external_initial_valuation: Option<InternalOrExternal>,
    pub internal_or_external_latest_valuation: Option<InternalOrExternal>,
    pub latest_estimated_rental_value: Option<f64>,
    pub legal_owner_of_the_property: Option<String>,
    pub number_of_bedrooms: Option<f64>,
    pub number_of_car_parking_spaces: Option<f64>,
    pub number_of_lettable_units: Option<f64>,
    pub number_of_units_occupied: Option<f64>,
    pub number_of_units_vacant: Option<f64>,
    pub party_liable_for_vat: Option<PartyLiableForVat>,
    pub percentage_complete: Option<f64>,
    pub planned_capex_next_12m: Option<f64>,
    pub provider_of_energy_performance_certificate: Option<String>,
    pub provider_of_initial_valuation: Option<String>,
    pub provider_of_latest_valuation: Option<String>,
    pub register_of_deeds_number: Option<String>,
    pub remaining_term_of_leasehold: Option<f64>,
    pub type_of_initial_valuation: Option<ValuationType>,
    pub value_of_energy_performance_certificate: Option<EnergyPerformanceCertificate>,
    pub vat_payable: Option<bool>,
    pub year_of_refurbishment: Option<NaiveDate>,
}

impl Entity for PropertyCollateral {
    const TABLE: &'static str = "npl_property_collateral";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "property_collateral";
    const LABEL: &'static str = "Property Collateral";
    const NATURAL_KEY: Option<&'static str> = Some("protection_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("protection_identifier").required(),
        Column::foreign_key("loan_id", Loan::TABLE),
        Column::text("address_of_property"),
        Column::text("city_of_property"),
        Column::text("property_postcode"),
        Column::text("property_country"),
        Column::choice("area_type_of_property", &AreaType::SET),
        Column::choice("sector_of_property", &SectorOfProperty::SET),
        Column::choice("type_of_property", &TypeOfProperty::SET),
        Column::choice("type_of_occupancy", &TypeOfOccupancy::SET),
        Column::choice("purpose_of_property", &PurposeOfProperty::SET),
        Column::choice("condition_of_property", &ConditionOfProperty::SET),
        Column::choice("tenure", &Tenure::SET),
        Column::real("building_area_m2"),
        Column::real("land_area_m2"),
        Column::real("number_of_rooms"),
        Column::text("currency_of_property"),
        Column::real("initial_valuation_amount"),
        Column::date("date_of_initial_valuation"),
        Column::real("latest_valuation_amount"),
        Column::date("date_of_latest_valuation"),
        Column::choice("type_of_latest_valuation", &ValuationType::SET),
        Column::real("current_annual_passing_rent"),
        Column::flag("enforcement_status"),
        Column::date("year_of_construction"),
        Column::real("amount_of_vat_payable"),
        Column::real("building_area_m2_lettable"),
        Column::real("building_area_m2_occupied"),
        Column::flag("completion_of_property"),
        Column::real("current_net_operating_income"),
        Column::real("current_opex_and_overheads"),
        Column::text("enforcement_description"),
        Column::flag("enforcement_status_third_parties"),
        Column::real("estimated_annual_void_cost"),
        Column::real("estimated_rental_void"),
        Column::choice("geographic_region_classification", &GeographicRegionClassification::SET),
        Column::text("geographic_region_of_property"),
        Column::real("initial_estimated_rental_value"),
        Column::choice("internal_or_external_initial_valuation", &InternalOrExternal::SET),
        Column::choice("internal_or_external_latest_valuation", &InternalOrExternal::SET),
        Column::real("latest_estimated_rental_value"),
        Column::text("legal_owner_of_the_property"),
        Column::real("number_of_bedrooms"),
        Column::real("number_of_car_parking_spaces"),
        Column::real("number_of_lettable_units"),
        Column::real("number_of_units_occupied"),
        Column::real("number_of_units_vacant"),
        Column::choice("party_liable_for_vat", &PartyLiableForVat::SET),
        Column::real("percentage_complete"),
        Column::real("planned_capex_next_12m"),
        Column::text("provider_of_energy_performance_certificate"),
        Column::text("provider_of_initial_valuation"),
        Column::text("provider_of_latest_valuation"),
        Column::text("register_of_deeds_number"),
        Column::real("remaining_term_of_leasehold"),
        Column::choice("type_of_initial_valuation", &ValuationType::SET),
        Column::choice(
            "value_of_energy_performance_certificate", &EnergyPerformanceCertificate::SET,
        ),
        Column::flag("vat_payable"),
        Column::date("year_of_refurbishment"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.protection_identifier.as_deref()
    }
}

/// Movable assets, securities and guarantees securing a loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonPropertyCollateral {
    pub protection_identifier: Option<String>,
    pub loan_id: Option<i64>,
    pub collateral_type: Option<CollateralType>,
    pub description: Option<String>,
    pub currency_of_collateral: Option<String>,
    pub manufacturer_of_collateral: Option<String>,
    pub name_or_model_of_collateral: Option<String>,
    pub registration_number: Option<String>,
    pub new_or_used: Option<NewOrUsed>,
    pub legal_owner: Option<String>,
    pub type_of_legal_owner: Option<EntityType>,
    pub initial_valuation_amount: Option<f64>,
    pub date_of_initial_valuation: Option<NaiveDate>,
    pub type_of_initial_valuation: Option<ValuationType>,
    pub latest_valuation_amount: Option<f64>,
    pub date_of_latest_valuation: Option<NaiveDate>,
    pub type_of_latest_valuation: Option<ValuationType>,
    pub activation_of_guarantee: Option<bool>,
    pub guarantee_amount: Option<f64>,
    pub enforcement_status: Option<bool>,
    pub year_of_manufacture: Option<NaiveDate>,
    pub collateral_insurance: Option<bool>,
    pub collateral_insurance_coverage_amount: Option<f64>,
    pub collateral_insurance_provider: Option<String>,
    pub estimated_useful_life: Option<i64>,
    pub configuration: Option<String>,
    pub original_country_of_registration: Option<String>,
    pub current_country_of_registration: Option<String>,
    pub current_opex_and_overheads: Option<f64>,
    pub enforcement_description: Option<String>,
    pub enforcement_status_third_parties: Option<bool>,
    pub engine_size: Option<f64>,
    pub initial_residual_value: Option<f64>,
    pub date_of_the_latest_residual_valuation: Option<NaiveDate>,
    pub initial_residual_valuation_date: Option<NaiveDate>,
    pub latest_residual_value: Option<f64>,
    pub asset_purchase_obligation: Option<bool>,
    pub option_to_buy_price: Option<f64>,
    pub year_of_registration: Option<NaiveDate>,
}

impl Entity for NonPropertyCollateral {
    const TABLE: &'static str = "npl_non_property_collateral";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "nonproperty_collateral";
    const LABEL: &'static str = "Non-Property Collateral";
    const NATURAL_KEY: Option<&'static str> = Some("protection_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("protection_identifier").required(),
        Column::foreign_key("loan_id", Loan::TABLE),
        Column::choice("collateral_type", &CollateralType::SET),
        Column::text("description"),
        Column::text("currency_of_collateral"),
        Column::text("manufacturer_of_collateral"),
        Column::text("name_or_model_of_collateral"),
        Column::text("registration_number"),
        Column::choice("new_or_used", &NewOrUsed::SET),
        Column::text("legal_owner"),
        Column::choice("type_of_legal_owner", &EntityType::SET),
        Column::real("initial_valuation_amount"),
        Column::date("date_of_initial_valuation"),
        Column::choice("type_of_initial_valuation", &ValuationType::SET),
        Column::real("latest_valuation_amount"),
        Column::date("date_of_latest_valuation"),
        Column::choice("type_of_latest_valuation", &ValuationType::SET),
        Column::flag("activation_of_guarantee"),
        Column::real("guarantee_amount"),
        Column::flag("enforcement_status"),
        Column::date("year_of_manufacture"),
        Column::flag("collateral_insurance"),
        Column::real("collateral_insurance_coverage_amount"),
        Column::text("collateral_insurance_provider"),
        Column::integer("estimated_useful_life"),
        Column::text("configuration"),
        Column::text("original_country_of_registration"),
        Column::text("current_country_of_registration"),
        Column::real("current_opex_and_overheads"),
        Column::text("enforcement_description"),
        Column::flag("enforcement_status_third_parties"),
        Column::real("engine_size"),
        Column::real("initial_residual_value"),
        Column::date("date_of_the_latest_residual_valuation"),
        Column::date("initial_residual_valuation_date"),
        Column::real("latest_residual_value"),
        Column::flag("asset_purchase_obligation"),
        Column::real("option_to_buy_price"),
        Column::date("year_of_registration"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.protection_identifier.as_deref()
    }
}
