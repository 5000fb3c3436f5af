//! Single-family loan performance entities.
//!
//! Static origination terms live on [`Loan`], [`Counterparty`] and
//! [`PropertyCollateral`]; the values reported each month live on the
//! matching `*State` record keyed by (entity, snapshot).

pub mod choices;
mod collateral;
mod counterparty;
mod loan;
mod workout;

pub use collateral::{PropertyCollateral, PropertyCollateralState};
pub use counterparty::{Counterparty, CounterpartyState};
pub use loan::{Loan, LoanState};
pub use workout::{Enforcement, Forbearance, RepaymentSchedule};

use super::{Column, Entity, TableSpec, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: Option<String>,
    pub description: Option<String>,
    pub deal_name: Option<String>,
    pub reference_pool_id: Option<String>,
}

impl Entity for Portfolio {
    const TABLE: &'static str = "sflp_portfolio";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "portfolios";
    const LABEL: &'static str = "Portfolio";
    const NATURAL_KEY: Option<&'static str> = Some("name");
    const COLUMNS: &'static [Column] = &[
        Column::text("name").required(),
        Column::text("description"),
        Column::text("deal_name"),
        Column::text("reference_pool_id"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One monthly reporting period of a portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Reporting period as delivered (`MMYYYY`).
    pub monthly_reporting_period: Option<String>,
    pub name: Option<String>,
    pub portfolio_id: Option<i64>,
    pub cutoff_date: Option<NaiveDate>,
}

impl Entity for PortfolioSnapshot {
    const TABLE: &'static str = "sflp_portfolio_snapshot";
    const TEMPLATE: Template = Template::Sflp;
    const COLLECTION: &'static str = "portfolio_snapshots";
    const LABEL: &'static str = "Portfolio Snapshot";
    const NATURAL_KEY: Option<&'static str> = Some("monthly_reporting_period");
    const COLUMNS: &'static [Column] = &[
        Column::text("monthly_reporting_period").required(),
        Column::text("name"),
        Column::foreign_key("portfolio_id", Portfolio::TABLE),
        Column::date("cutoff_date"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.monthly_reporting_period.as_deref()
    }
}

pub fn tables() -> Vec<TableSpec> {
    vec![
        TableSpec::of::<Portfolio>(),
        TableSpec::of::<PortfolioSnapshot>(),
        TableSpec::of::<Loan>(),
        TableSpec::of::<LoanState>(),
        TableSpec::of::<Counterparty>(),
        TableSpec::of::<CounterpartyState>(),
        TableSpec::of::<PropertyCollateral>(),
        TableSpec::of::<PropertyCollateralState>(),
        TableSpec::of::<Enforcement>(),
        TableSpec::of::<Forbearance>(),
        TableSpec::of::<RepaymentSchedule>(),
    ]
}
