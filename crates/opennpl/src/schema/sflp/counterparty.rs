use super::choices::FirstTimeHomeBuyer;
use super::{Loan, PortfolioSnapshot};
use crate::schema::{Column, Entity, Template};
use serde::{Deserialize, Serialize};

/// Borrower attributes captured at origination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counterparty {
    pub counterparty_identifier: Option<String>,
    pub loan_id: Option<i64>,
    pub number_of_borrowers: Option<i64>,
    pub debt_to_income: Option<f64>,
    pub borrower_credit_score_at_origination: Option<i64>,
    pub coborrower_credit_score_at_origination: Option<i64>,
    pub borrower_credit_score_at_issuance: Option<i64>,
    pub coborrower_credit_score_at_issuance: Option<i64>,
    pub first_time_home_buyer_indicator: Option<FirstTimeHomeBuyer>,
}

impl Entity for Counterparty {
    const TABLE: &'static str = "sflp_counterparty";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "counterparties";
    const LABEL: &'static str = "Counterparty";
    const NATURAL_KEY: Option<&'static str> = Some("counterparty_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("counterparty_identifier").required(),
        Column::foreign_key("loan_id", Loan::TABLE),
        Column::integer("number_of_borrowers"),
        Column::real("debt_to_income"),
        Column::integer("borrower_credit_score_at_origination"),
        Column::integer("coborrower_credit_score_at_origination"),
        Column::integer("borrower_credit_score_at_issuance"),
        Column::integer("coborrower_credit_score_at_issuance"),
        Column::choice("first_time_home_buyer_indicator", &FirstTimeHomeBuyer::SET),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.counterparty_identifier.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyState {
    pub counterparty_id: Option<i64>,
    pub portfolio_snapshot_id: Option<i64>,
    pub borrower_credit_score_current: Option<i64>,
    pub coborrower_credit_score_current: Option<i64>,
}

impl Entity for CounterpartyState {
    const TABLE: &'static str = "sflp_counterparty_state";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "counterparty_states";
    const LABEL: &'static str = "Counterparty State";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("counterparty_id", Counterparty::TABLE).required(),
        Column::foreign_key("portfolio_snapshot_id", PortfolioSnapshot::TABLE),
        Column::integer("borrower_credit_score_current"),
        Column::integer("coborrower_credit_score_current"),
    ];
}
