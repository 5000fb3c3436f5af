//! EBA NPL template entities.

pub mod choices;
mod collateral;
mod counterparty;
mod loan;
mod recovery;

pub use collateral::{NonPropertyCollateral, PropertyCollateral};
pub use counterparty::{Counterparty, CounterpartyGroup};
pub use loan::Loan;
pub use recovery::{Enforcement, ExternalCollection, Forbearance};

use super::{Column, Entity, TableSpec, Template};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Named collection of NPL data sets belonging to one credit portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Entity for Portfolio {
    const TABLE: &'static str = "npl_portfolio";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "portfolios";
    const LABEL: &'static str = "Portfolio";
    const NATURAL_KEY: Option<&'static str> = Some("name");
    const COLUMNS: &'static [Column] = &[
        Column::text("name").required(),
        Column::text("description"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Portfolio data as of a cutoff date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub name: Option<String>,
    pub portfolio_id: Option<i64>,
    pub cutoff_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Entity for PortfolioSnapshot {
    const TABLE: &'static str = "npl_portfolio_snapshot";
    const TEMPLATE: Template = Template::Npl;
    const COLLECTION: &'static str = "portfolio_snapshots";
    const LABEL: &'static str = "Portfolio Snapshot";
    const NATURAL_KEY: Option<&'static str> = Some("name");
    const COLUMNS: &'static [Column] = &[
        Column::text("name").required(),
        Column::foreign_key("portfolio_id", Portfolio::TABLE),
        Column::date("cutoff_date"),
        Column::text("notes"),
    ];

    fn natural_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

pub fn tables() -> Vec<TableSpec> {
    vec![
        TableSpec::of::<Portfolio>(),
        TableSpec::of::<PortfolioSnapshot>(),
        TableSpec::of::<CounterpartyGroup>(),
        TableSpec::of::<Counterparty>(),
        TableSpec::of::<Loan>(),
        TableSpec::of::<PropertyCollateral>(),
        TableSpec::of::<NonPropertyCollateral>(),
        TableSpec::of::<Enforcement>(),
        TableSpec::of::<Forbearance>(),
        TableSpec::of::<ExternalCollection>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::assert_columns_match_fields;

    #[test]
    fn descriptors_match_struct_fields() {
        assert_columns_match_fields::<Portfolio>();
        assert_columns_match_fields::<PortfolioSnapshot>();
        assert_columns_match_fields::<CounterpartyGroup>();
        assert_columns_match_fields::<Counterparty>();
        assert_columns_match_fields::<Loan>();
        assert_columns_match_fields::<PropertyCollateral>();
        assert_columns_match_fields::<NonPropertyCollateral>();
        assert_columns_match_fields::<Enforcement>();
        assert_columns_match_fields::<Forbearance>();
        assert_columns_match_fields::<ExternalCollection>();
    }

    #[test]
    fn natural_keys_read_identifier_fields() {
        let loan = Loan {
            contract_identifier: Some("test".to_string()),
            ..Loan::default()
        };
        assert_eq!(loan.natural_key(), Some("test"));
        assert_eq!(Enforcement::default().natural_key(), None);
    }

    fn field_names<E: Entity>() -> Vec<String> {
        match serde_json::to_value(E::default()).expect("serializes") {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn collateral_and_workout_tables_carry_the_full_template() {
        let property = field_names::<PropertyCollateral>();
        for field in [
            "geographic_region_classification",
            "internal_or_external_latest_valuation",
            "party_liable_for_vat",
            "value_of_energy_performance_certificate",
            "completion_of_property",
            "number_of_bedrooms",
            "provider_of_latest_valuation",
        ] {
            assert!(property.iter().any(|name| name == field), "{field}");
        }

        let enforcement = field_names::<Enforcement>();
        for field in [
            "court_auction_identifier",
            "court_auction_reserve_price_for_next_auction",
            "insurance_coverage_amount",
            "offer_price",
            "current_market_status",
        ] {
            assert!(enforcement.iter().any(|name| name == field), "{field}");
        }

        let forbearance = field_names::<Forbearance>();
        for field in ["type_of_forbearance", "repayment_frequency_under_forbearance"] {
            assert!(forbearance.iter().any(|name| name == field), "{field}");
        }
        assert!(field_names::<NonPropertyCollateral>()
            .iter()
            .any(|name| name == "collateral_insurance_provider"));
        assert!(field_names::<ExternalCollection>()
            .iter()
            .any(|name| name == "type_of_identifier"));
    }
}
