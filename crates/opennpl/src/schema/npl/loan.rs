use super::{Counterparty, Portfolio, PortfolioSnapshot};
use crate::schema::{Column, Entity, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A credit contract of the NPL portfolio, keyed by its contract identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub contract_identifier: Option<String>,
    pub counterparty_id: Option<i64>,
    pub portfolio_id: Option<i64>,
    pub snapshot_id: Option<i64>,
    pub asset_class: Option<String>,
    pub channel_of_origination: Option<String>,
    pub loan_purpose: Option<String>,
    pub loan_covenants: Option<bool>,
    pub currency_of_loan: Option<String>,
    pub date_of_origination: Option<NaiveDate>,
    pub current_maturity_date: Option<NaiveDate>,
    pub date_of_default: Option<NaiveDate>,
    pub principal_balance: Option<f64>,
    pub accrued_interest_balance_sheet: Option<f64>,
    pub legal_balance: Option<f64>,
    pub current_interest_rate: Option<f64>,
    pub final_bullet_repayment: Option<f64>,
    pub subsidy_amount: Option<f64>,
    pub days_in_arrears: Option<i64>,
}

impl Entity for Loan {
    const TABLE: &'static str = "npl_loan";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "loans";
    const LABEL: &'static str = "Loan";
    const NATURAL_KEY: Option<&'static str> = Some("contract_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("contract_identifier").required(),
        Column::foreign_key("counterparty_id", Counterparty::TABLE),
        Column::foreign_key("portfolio_id", Portfolio::TABLE),
        Column::foreign_key("snapshot_id", PortfolioSnapshot::TABLE),
        Column::text("asset_class"),
        Column::text("channel_of_origination"),
        Column::text("loan_purpose"),
        Column::flag("loan_covenants"),
        Column::text("currency_of_loan"),
        Column::date("date_of_origination"),
        Column::date("current_maturity_date"),
        Column::date("date_of_default"),
        Column::real("principal_balance"),
        Column::real("accrued_interest_balance_sheet"),
        Column::real("legal_balance"),
        Column::real("current_interest_rate"),
        Column::real("final_bullet_repayment"),
        Column::real("subsidy_amount"),
        Column::integer("days_in_arrears"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.contract_identifier.as_deref()
    }
}
