use super::choices::{
    AmortizationType, Channel, LoanHoldbackIndicator, LoanPurpose, MortgageInsuranceType,
    SpecialEligibilityProgram, ZeroBalanceCode,
};
use super::{Portfolio, PortfolioSnapshot};
use crate::schema::{Column, Entity, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Acquisition data of a mortgage; fixed at origination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_identifier: Option<String>,
    pub portfolio_id: Option<i64>,
    pub channel: Option<Channel>,
    pub seller_name: Option<String>,
    pub original_interest_rate: Option<f64>,
    pub original_upb: Option<f64>,
    pub original_loan_term: Option<i64>,
    pub origination_date: Option<NaiveDate>,
    pub first_payment_date: Option<NaiveDate>,
    pub original_loan_to_value_ratio: Option<f64>,
    pub original_combined_loan_to_value_ratio: Option<f64>,
    pub loan_purpose: Option<LoanPurpose>,
    pub mortgage_insurance_percentage: Option<f64>,
    pub mortgage_insurance_type: Option<MortgageInsuranceType>,
    pub amortization_type: Option<AmortizationType>,
    pub relocation_mortgage_indicator: Option<bool>,
    pub high_balance_loan_indicator: Option<bool>,
    pub special_eligibility_program: Option<SpecialEligibilityProgram>,
    pub prepayment_penalty_indicator: Option<bool>,
    pub interest_only_loan_indicator: Option<bool>,
    pub arm_initial_fixed_rate_period_less_than_5_yr: Option<bool>,
    pub arm_product_type: Option<String>,
    pub initial_fixed_rate_period: Option<i64>,
    pub initial_interest_rate_cap: Option<f64>,
    pub arm_balloon_indicator: Option<bool>,
    pub arm_plan_number: Option<String>,
    pub arm_cap_structure: Option<String>,
}

impl Entity for Loan {
    const TABLE: &'static str = "sflp_loan";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "loans";
    const LABEL: &'static str = "Loan";
    const NATURAL_KEY: Option<&'static str> = Some("loan_identifier");
    const COLUMNS: &'static [Column] = &[
        Column::text("loan_identifier").required(),
        Column::foreign_key("portfolio_id", Portfolio::TABLE),
        Column::choice("channel", &Channel::SET),
        Column::text("seller_name"),
        Column::real("original_interest_rate"),
        Column::real("original_upb"),
        Column::integer("original_loan_term"),
        Column::date("origination_date"),
        Column::date("first_payment_date"),
        Column::real("original_loan_to_value_ratio"),
        Column::real("original_combined_loan_to_value_ratio"),
        Column::choice("loan_purpose", &LoanPurpose::SET),
        Column::real("mortgage_insurance_percentage"),
        Column::choice("mortgage_insurance_type", &MortgageInsuranceType::SET),
        Column::choice("amortization_type", &AmortizationType::SET),
        Column::flag("relocation_mortgage_indicator"),
        Column::flag("high_balance_loan_indicator"),
        Column::choice("special_eligibility_program", &SpecialEligibilityProgram::SET),
        Column::flag("prepayment_penalty_indicator"),
        Column::flag("interest_only_loan_indicator"),
        Column::flag("arm_initial_fixed_rate_period_less_than_5_yr"),
        Column::text("arm_product_type"),
        Column::integer("initial_fixed_rate_period"),
        Column::real("initial_interest_rate_cap"),
        Column::flag("arm_balloon_indicator"),
        Column::text("arm_plan_number"),
        Column::text("arm_cap_structure"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.loan_identifier.as_deref()
    }
}

/// Performance data of a loan for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanState {
    pub loan_id: Option<i64>,
    pub portfolio_snapshot_id: Option<i64>,
    pub servicer_name: Option<String>,
    pub master_servicer: Option<String>,
    pub current_interest_rate: Option<f64>,
    pub current_actual_upb: Option<f64>,
    pub loan_age: Option<i64>,
    pub remaining_months_to_legal_maturity: Option<i64>,
    pub remaining_months_to_maturity: Option<i64>,
    pub maturity_date: Option<NaiveDate>,
    pub current_loan_delinquency_status: Option<String>,
    pub high_loan_to_value_refinance_option_indicator: Option<bool>,
    pub zero_balance_code: Option<ZeroBalanceCode>,
    pub zero_balance_effective_date: Option<NaiveDate>,
    pub zero_balance_code_change_date: Option<NaiveDate>,
    pub upb_at_the_time_of_removal: Option<f64>,
    pub total_principal_current: Option<f64>,
    pub scheduled_principal_current: Option<f64>,
    pub unscheduled_principal_current: Option<f64>,
    pub last_paid_installment_date: Option<NaiveDate>,
    pub months_to_amortization: Option<i64>,
    pub mortgage_insurance_cancellation_indicator: Option<String>,
    pub loan_holdback_indicator: Option<LoanHoldbackIndicator>,
    pub loan_holdback_effective_date: Option<NaiveDate>,
    pub next_interest_rate_adjustment_date: Option<NaiveDate>,
    pub next_payment_change_date: Option<NaiveDate>,
    pub servicing_activity_indicator: Option<bool>,
    pub delinquent_accrued_interest: Option<f64>,
    pub repayment_history: Option<String>,
    pub upb_at_issuance: Option<f64>,
    pub interest_only_first_principal_and_interest_payment_date: Option<NaiveDate>,
    pub interest_rate_adjustment_frequency: Option<i64>,
    pub index: Option<String>,
    pub mortgage_margin: Option<f64>,
    pub periodic_interest_rate_cap: Option<f64>,
    pub lifetime_interest_rate_cap: Option<f64>,
}

impl Entity for LoanState {
    const TABLE: &'static str = "sflp_loan_state";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "loan_states";
    const LABEL: &'static str = "Loan State";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("loan_id", Loan::TABLE).required(),
        Column::foreign_key("portfolio_snapshot_id", PortfolioSnapshot::TABLE),
        Column::text("servicer_name"),
        Column::text("master_servicer"),
        Column::real("current_interest_rate"),
        Column::real("current_actual_upb"),
        Column::integer("loan_age"),
        Column::integer("remaining_months_to_legal_maturity"),
        Column::integer("remaining_months_to_maturity"),
        Column::date("maturity_date"),
        Column::text("current_loan_delinquency_status"),
        Column::flag("high_loan_to_value_refinance_option_indicator"),
        Column::choice("zero_balance_code", &ZeroBalanceCode::SET),
        Column::date("zero_balance_effective_date"),
        Column::date("zero_balance_code_change_date"),
        Column::real("upb_at_the_time_of_removal"),
        Column::real("total_principal_current"),
        Column::real("scheduled_principal_current"),
        Column::real("unscheduled_principal_current"),
        Column::date("last_paid_installment_date"),
        Column::integer("months_to_amortization"),
        Column::text("mortgage_insurance_cancellation_indicator"),
        Column::choice("loan_holdback_indicator", &LoanHoldbackIndicator::SET),
        Column::date("loan_holdback_effective_date"),
        Column::date("next_interest_rate_adjustment_date"),
        Column::date("next_payment_change_date"),
        Column::flag("servicing_activity_indicator"),
        Column::real("delinquent_accrued_interest"),
        Column::text("repayment_history"),
        Column::real("upb_at_issuance"),
        Column::date("interest_only_first_principal_and_interest_payment_date"),
        Column::integer("interest_rate_adjustment_frequency"),
        Column::text("index"),
        Column::real("mortgage_margin"),
        Column::real("periodic_interest_rate_cap"),
        Column::real("lifetime_interest_rate_cap"),
    ];
}
