use super::choices::{AlternativeDelinquencyResolution, BorrowerAssistancePlan};
use super::{Loan, PortfolioSnapshot, PropertyCollateral};
use crate::schema::{Column, Entity, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Foreclosure and disposition data of a defaulted loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enforcement {
    pub loan_id: Option<i64>,
    pub property_collateral_id: Option<i64>,
    pub portfolio_snapshot_id: Option<i64>,
    pub repurchase_date: Option<NaiveDate>,
    pub foreclosure_date: Option<NaiveDate>,
    pub disposition_date: Option<NaiveDate>,
    pub foreclosure_costs: Option<f64>,
    pub asset_recovery_costs: Option<f64>,
    pub net_sales_proceeds: Option<f64>,
    pub credit_enhancement_proceeds: Option<f64>,
    pub repurchase_make_whole_proceeds: Option<f64>,
    pub other_foreclosure_proceeds: Option<f64>,
    pub original_list_start_date: Option<NaiveDate>,
    pub original_list_price: Option<f64>,
    pub current_list_start_date: Option<NaiveDate>,
    pub current_list_price: Option<f64>,
    pub cumulative_credit_event_net_gain_or_loss: Option<f64>,
    pub foreclosure_principal_writeoff_amount: Option<f64>,
    pub repurchase_make_whole_proceeds_flag: Option<bool>,
}

impl Entity for Enforcement {
    const TABLE: &'static str = "sflp_enforcement";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "enforcement";
    const LABEL: &'static str = "Enforcement";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("loan_id", Loan::TABLE).required(),
        Column::foreign_key("property_collateral_id", PropertyCollateral::TABLE),
        Column::foreign_key("portfolio_snapshot_id", PortfolioSnapshot::TABLE),
        Column::date("repurchase_date"),
        Column::date("foreclosure_date"),
        Column::date("disposition_date"),
        Column::real("foreclosure_costs"),
        Column::real("asset_recovery_costs"),
        Column::real("net_sales_proceeds"),
        Column::real("credit_enhancement_proceeds"),
        Column::real("repurchase_make_whole_proceeds"),
        Column::real("other_foreclosure_proceeds"),
        Column::date("original_list_start_date"),
        Column::real("original_list_price"),
        Column::date("current_list_start_date"),
        Column::real("current_list_price"),
        Column::real("cumulative_credit_event_net_gain_or_loss"),
        Column::real("foreclosure_principal_writeoff_amount"),
        Column::flag("repurchase_make_whole_proceeds_flag"),
    ];
}

/// Modification and payment relief reported for a loan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forbearance {
    pub loan_id: Option<i64>,
    pub portfolio_snapshot_id: Option<i64>,
    pub current_loan_delinquency_status: Option<String>,
    pub modification_flag: Option<bool>,
    pub noninterest_bearing_upb: Option<f64>,
    pub principal_forgiveness_amount: Option<f64>,
    pub current_period_modification_loss_amount: Option<f64>,
    pub cumulative_modification_loss_amount: Option<f64>,
    pub current_period_credit_event_net_gain_or_loss: Option<f64>,
    pub delinquent_accrued_interest: Option<f64>,
    pub borrower_assistance_plan: Option<BorrowerAssistancePlan>,
    pub alternative_delinquency_resolution: Option<AlternativeDelinquencyResolution>,
    pub alternative_delinquency_resolution_count: Option<i64>,
    pub total_deferral_amount: Option<f64>,
}

impl Entity for Forbearance {
    const TABLE: &'static str = "sflp_forbearance";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "forbearance";
    const LABEL: &'static str = "Forbearance";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("loan_id", Loan::TABLE).required(),
        Column::foreign_key("portfolio_snapshot_id", PortfolioSnapshot::TABLE),
        Column::text("current_loan_delinquency_status"),
        Column::flag("modification_flag"),
        Column::real("noninterest_bearing_upb"),
        Column::real("principal_forgiveness_amount"),
        Column::real("current_period_modification_loss_amount"),
        Column::real("cumulative_modification_loss_amount"),
        Column::real("current_period_credit_event_net_gain_or_loss"),
        Column::real("delinquent_accrued_interest"),
        Column::choice("borrower_assistance_plan", &BorrowerAssistancePlan::SET),
        Column::choice(
            "alternative_delinquency_resolution",
            &AlternativeDelinquencyResolution::SET,
        ),
        Column::integer("alternative_delinquency_resolution_count"),
        Column::real("total_deferral_amount"),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub loan_id: Option<i64>,
    pub portfolio_snapshot_id: Option<i64>,
    /// Two-character delinquency codes, most recent month first.
    pub loan_payment_history: Option<String>,
}

impl Entity for RepaymentSchedule {
    const TABLE: &'static str = "sflp_repayment_schedule";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "repayment_schedules";
    const LABEL: &'static str = "Repayment Schedule";
    const COLUMNS: &'static [Column] = &[
        Column::foreign_key("loan_id", Loan::TABLE).required(),
        Column::foreign_key("portfolio_snapshot_id", PortfolioSnapshot::TABLE),
        Column::text("loan_payment_history"),
    ];
}
