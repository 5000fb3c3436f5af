//! Post-default workout records: enforcement, forbearance and external
//! collection.

use super::choices::{CurrentMarketStatus, RepaymentFrequency, TypeOfForbearance, TypeOfIdentifier};
use super::{Counterparty, Loan, NonPropertyCollateral, PropertyCollateral};
use crate::schema::{Column, Entity, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enforcement {
    pub enforcement_identifier: Option<String>,
    pub protection_identifier: Option<String>,
    pub property_collateral_id: Option<i64>,
    pub non_property_collateral_id: Option<i64>,
    pub counterparty_id: Option<i64>,
    pub currency_of_enforcement: Option<String>,
    pub jurisdiction_of_court: Option<String>,
    pub indicator_of_enforcement: Option<bool>,
    pub indicator_of_receivership: Option<bool>,
    pub name_of_receiver: Option<String>,
    pub name_of_legal_firm: Option<String>,
    pub court_appraisal_amount: Option<f64>,
    pub date_of_court_appraisal: Option<NaiveDate>,
    pub collateral_repossessed_date: Option<NaiveDate>,
    pub first_auction_date: Option<NaiveDate>,
    pub last_auction_date: Option<NaiveDate>,
    pub next_auction_date: Option<NaiveDate>,
    pub number_of_failed_auctions: Option<f64>,
    pub gross_sale_proceeds: Option<f64>,
    pub net_sale_proceeds: Option<f64>,
    pub sale_agreed_price: Option<f64>,
    pub sold_date: Option<NaiveDate>,
    pub enforcement_description: Option<String>,
    pub amount_of_outstanding_liabilities: Option<f64>,
    pub annual_insurance_payment: Option<f64>,
    pub contracted_date: Option<NaiveDate>,
    pub costs_accrued_to_buyer: Option<f64>,
    pub costs_at_end_of_sale: Option<f64>,
    pub court_auction_identifier: Option<String>,
    pub court_auction_reserve_price_for_first_auction: Option<f64>,
    pub court_auction_reserve_price_for_last_auction: Option<f64>,
    pub court_auction_reserve_price_for_next_auction: Option<f64>,
    pub current_market_status: Option<CurrentMarketStatus>,
    pub date_next_insurance_payment_is_due: Option<NaiveDate>,
    pub date_of_receiver_appointment: Option<NaiveDate>,
    pub fees_of_receivership: Option<f64>,
    pub funds_remitted_full_date: Option<NaiveDate>,
    pub funds_remitted_partial_date: Option<NaiveDate>,
    pub insurance: Option<bool>,
    pub insurance_coverage_amount: Option<f64>,
    pub insurance_provider: Option<String>,
    pub offer_price: Option<f64>,
    pub on_market_offer_date: Option<NaiveDate>,
    pub on_market_price: Option<f64>,
    pub other_ongoing_enforcement_proceedings: Option<String>,
    pub prepare_property_for_sale_date: Option<NaiveDate>,
    pub property_on_market_date: Option<NaiveDate>,
    pub sale_agreed_date: Option<NaiveDate>,
}

impl Entity for Enforcement {
    const TABLE: &'static str = "npl_enforcement";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "enforcement";
    const LABEL: &'static str = "Enforcement";
    const NATURAL_KEY: Option<&'static str> = Some("enforcement_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("enforcement_identifier").required(),
        Column::text("protection_identifier"),
        Column::foreign_key("property_collateral_id", PropertyCollateral::TABLE),
        Column::foreign_key("non_property_collateral_id", NonPropertyCollateral::TABLE),
        Column::foreign_key("counterparty_id", Counterparty::TABLE),
        Column::text("currency_of_enforcement"),
        Column::text("jurisdiction_of_court"),
        Column::flag("indicator_of_enforcement"),
        Column::flag("indicator_of_receivership"),
        Column::text("name_of_receiver"),
        Column::text("name_of_legal_firm"),
        Column::real("court_appraisal_amount"),
        Column::date("date_of_court_appraisal"),
        Column::date("collateral_repossessed_date"),
        Column::date("first_auction_date"),
        Column::date("last_auction_date"),
        Column::date("next_auction_date"),
        Column::real("number_of_failed_auctions"),
        Column::real("gross_sale_proceeds"),
        Column::real("net_sale_proceeds"),
        Column::real("sale_agreed_price"),
        Column::date("sold_date"),
        Column::text("enforcement_description"),
        Column::real("amount_of_outstanding_liabilities"),
        Column::real("annual_insurance_payment"),
        Column::date("contracted_date"),
        Column::real("costs_accrued_to_buyer"),
        Column::real("costs_at_end_of_sale"),
        Column::text("court_auction_identifier"),
        Column::real("court_auction_reserve_price_for_first_auction"),
        Column::real("court_auction_reserve_price_for_last_auction"),
        Column::real("court_auction_reserve_price_for_next_auction"),
        Column::choice("current_market_status", &CurrentMarketStatus::SET),
        Column::date("date_next_insurance_payment_is_due"),
        Column::date("date_of_receiver_appointment"),
        Column::real("fees_of_receivership"),
        Column::date("funds_remitted_full_date"),
        Column::date("funds_remitted_partial_date"),
        Column::flag("insurance"),
        Column::real("insurance_coverage_amount"),
        Column::text("insurance_provider"),
        Column::real("offer_price"),
        Column::date("on_market_offer_date"),
        Column::real("on_market_price"),
        Column::text("other_ongoing_enforcement_proceedings"),
        Column::date("prepare_property_for_sale_date"),
        Column::date("property_on_market_date"),
        Column::date("sale_agreed_date"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.enforcement_identifier.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forbearance {
    pub forbearance_identifier: Option<String>,
    pub loan_id: Option<i64>,
    pub counterparty_id: Option<i64>,
    pub instrument_identifier: Option<String>,
    pub description_of_forbearance: Option<String>,
    pub clause_to_stop_forbearance: Option<bool>,
    pub date_of_first_forbearance: Option<NaiveDate>,
    pub start_date_of_forbearance: Option<NaiveDate>,
    pub end_date_of_forbearance: Option<NaiveDate>,
    pub interest_rate_under_forbearance: Option<f64>,
    pub number_of_historical_forbearance: Option<f64>,
    pub principal_forgiveness: Option<f64>,
    pub date_of_principal_forgiveness: Option<NaiveDate>,
    pub repayment_amount_under_forbearance: Option<f64>,
    pub amount_of_repayment_step_up: Option<f64>,
    pub date_of_repayment_step_up: Option<NaiveDate>,
    pub type_of_identifier: Option<TypeOfIdentifier>,
    pub institutions_internal_identifier_for_the_loan_or_counterparty: Option<String>,
    pub description_of_the_forbearance_clause: Option<String>,
    pub repayment_frequency_under_forbearance: Option<RepaymentFrequency>,
    pub type_of_forbearance: Option<TypeOfForbearance>,
}

impl Entity for Forbearance {
    const TABLE: &'static str = "npl_forbearance";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "forbearance";
    const LABEL: &'static str = "Forbearance";
    const NATURAL_KEY: Option<&'static str> = Some("forbearance_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("forbearance_identifier").required(),
        Column::foreign_key("loan_id", Loan::TABLE),
        Column::foreign_key("counterparty_id", Counterparty::TABLE),
        Column::text("instrument_identifier"),
        Column::text("description_of_forbearance"),
        Column::flag("clause_to_stop_forbearance"),
        Column::date("date_of_first_forbearance"),
        Column::date("start_date_of_forbearance"),
        Column::date("end_date_of_forbearance"),
        Column::real("interest_rate_under_forbearance"),
        Column::real("number_of_historical_forbearance"),
        Column::real("principal_forgiveness"),
        Column::date("date_of_principal_forgiveness"),
        Column::real("repayment_amount_under_forbearance"),
        Column::real("amount_of_repayment_step_up"),
        Column::date("date_of_repayment_step_up"),
        Column::choice("type_of_identifier", &TypeOfIdentifier::SET),
        Column::text("institutions_internal_identifier_for_the_loan_or_counterparty"),
        Column::text("description_of_the_forbearance_clause"),
        Column::choice("repayment_frequency_under_forbearance", &RepaymentFrequency::SET),
        Column::choice("type_of_forbearance", &TypeOfForbearance::SET),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.forbearance_identifier.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalCollection {
    pub external_collection_identifier: Option<String>,
    pub loan_id: Option<i64>,
    pub counterparty_id: Option<i64>,
    pub instrument_identifier: Option<String>,
    pub name_of_external_debt_collection_agent: Option<String>,
    pub legal_entity_identifier: Option<String>,
    pub registration_number: Option<String>,
    pub balance_amount_sent_to_agent: Option<f64>,
    pub cash_recoveries: Option<f64>,
    pub costs_accrued: Option<f64>,
    pub principal_forgiveness: Option<f64>,
    pub date_sent_to_agent: Option<NaiveDate>,
    pub date_returned_from_agent: Option<NaiveDate>,
    pub quantity_returned_from_agent: Option<f64>,
    pub repayment_plan: Option<bool>,
    pub repayment_plan_description: Option<String>,
    pub institutions_internal_identifier_for_the_loan_or_counterparty: Option<String>,
    pub type_of_identifier: Option<TypeOfIdentifier>,
}

impl Entity for ExternalCollection {
    const TABLE: &'static str = "npl_external_collection";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "external_collection";
    const LABEL: &'static str = "External Collection";
    const NATURAL_KEY: Option<&'static str> = Some("external_collection_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("external_collection_identifier").required(),
        Column::foreign_key("loan_id", Loan::TABLE),
        Column::foreign_key("counterparty_id", Counterparty::TABLE),
        Column::text("instrument_identifier"),
        Column::text("name_of_external_debt_collection_agent"),
        Column::text("legal_entity_identifier"),
        Column::text("registration_number"),
        Column::real("balance_amount_sent_to_agent"),
        Column::real("cash_recoveries"),
        Column::real("costs_accrued"),
        Column::real("principal_forgiveness"),
        Column::date("date_sent_to_agent"),
        Column::date("date_returned_from_agent"),
        Column::real("quantity_returned_from_agent"),
        Column::flag("repayment_plan"),
        Column::text("repayment_plan_description"),
        Column::text("institutions_internal_identifier_for_the_loan_or_counterparty"),
        Column::choice("type_of_identifier", &TypeOfIdentifier::SET),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.external_collection_identifier.as_deref()
    }
}
