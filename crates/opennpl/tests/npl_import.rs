use chrono::NaiveDate;
use opennpl::loader::{load_npl, FixtureDir, LoadError, LoadOptions, MemoryFixtures};
use opennpl::schema::npl::choices::{
    CollateralType, CrossCollateralisation, CurrentMarketStatus, EnergyPerformanceCertificate,
    RepaymentFrequency, TypeOfForbearance, TypeOfProperty,
};
use opennpl::schema::npl::{
    Counterparty, CounterpartyGroup, Enforcement, ExternalCollection, Forbearance, Loan,
    NonPropertyCollateral, Portfolio, PortfolioSnapshot, PropertyCollateral,
};
use opennpl::schema::Entity;
use opennpl::store::Store;
use std::fs;
use std::path::PathBuf;

fn fixture_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../npl_portfolio/fixtures"))
}

/// The on-disk fixture set held in memory, so single files can be swapped.
fn fixture_copy() -> MemoryFixtures {
    let files = [
        "portfolio.csv",
        "portfolio_snapshot.csv",
        "counterparty_group.csv",
        "counterparty.csv",
        "loan.csv",
        "property_collateral.csv",
        "non_property_collateral.csv",
        "enforcement.csv",
        "forbearance.csv",
        "external_collection.csv",
    ];
    files.iter().fold(MemoryFixtures::new(), |fixtures, file| {
        let contents = fs::read_to_string(fixture_root().join(file)).expect("fixture readable");
        fixtures.with(file, contents)
    })
}

#[test]
fn loads_the_template_with_links() {
    let store = Store::in_memory().expect("store");
    let report = load_npl(&store, &FixtureDir::new(fixture_root()), &LoadOptions::default())
        .expect("npl load succeeds");

    assert_eq!(report.inserted(Portfolio::TABLE), 1);
    assert_eq!(report.inserted(PortfolioSnapshot::TABLE), 1);
    assert_eq!(report.inserted(CounterpartyGroup::TABLE), 2);
    assert_eq!(report.inserted(Counterparty::TABLE), 3);
    assert_eq!(report.inserted(Loan::TABLE), 4);
    assert_eq!(report.inserted(PropertyCollateral::TABLE), 2);
    assert_eq!(report.inserted(NonPropertyCollateral::TABLE), 1);
    assert_eq!(report.inserted(Enforcement::TABLE), 1);
    assert_eq!(report.inserted(Forbearance::TABLE), 1);
    assert_eq!(report.inserted(ExternalCollection::TABLE), 1);

    let snapshot = &store.list::<PortfolioSnapshot>().expect("list")[0];
    assert_eq!(
        snapshot.fields.cutoff_date,
        NaiveDate::from_ymd_opt(2020, 6, 30)
    );

    let groups = store.list::<CounterpartyGroup>().expect("list");
    assert_eq!(
        groups[0].fields.cross_collateralisation_in_counterparty_group,
        Some(CrossCollateralisation::Full)
    );
    assert_eq!(groups[0].fields.snapshot_id, Some(snapshot.id));

    let counterparties = store.list::<Counterparty>().expect("list");
    assert_eq!(counterparties[0].fields.counterparty_group_id, Some(groups[0].id));
    assert_eq!(counterparties[0].fields.in_insolvency, Some(true));

    let loans = store.list::<Loan>().expect("list");
    assert_eq!(loans[1].fields.counterparty_id, Some(counterparties[0].id));
    assert_eq!(loans[2].fields.days_in_arrears, Some(182));

    let property = store.list::<PropertyCollateral>().expect("list");
    assert_eq!(property[1].fields.loan_id, Some(loans[3].id));
    assert_eq!(
        property[1].fields.type_of_property,
        Some(TypeOfProperty::Apartment)
    );

    let guarantee = &store.list::<NonPropertyCollateral>().expect("list")[0].fields;
    assert_eq!(guarantee.collateral_type, Some(CollateralType::Guarantee));

    let enforcement = &store.list::<Enforcement>().expect("list")[0].fields;
    assert_eq!(enforcement.property_collateral_id, Some(property[0].id));
    assert_eq!(enforcement.non_property_collateral_id, None);
    assert_eq!(enforcement.protection_identifier.as_deref(), Some("P-7001"));
}

#[test]
fn auction_insurance_and_valuation_details_are_kept() {
    let store = Store::in_memory().expect("store");
    load_npl(&store, &FixtureDir::new(fixture_root()), &LoadOptions::default()).expect("load");

    let enforcement = &store.list::<Enforcement>().expect("list")[0].fields;
    assert_eq!(enforcement.court_auction_identifier.as_deref(), Some("RG 4471/2019"));
    assert_eq!(enforcement.current_market_status, Some(CurrentMarketStatus::OnMarket));
    assert_eq!(enforcement.insurance, Some(true));
    assert_eq!(enforcement.insurance_provider.as_deref(), Some("Generali Italia"));
    assert_eq!(enforcement.offer_price, None);

    let forbearance = &store.list::<Forbearance>().expect("list")[0].fields;
    assert_eq!(forbearance.type_of_forbearance, Some(TypeOfForbearance::InterestOnly));
    assert_eq!(
        forbearance.repayment_frequency_under_forbearance,
        Some(RepaymentFrequency::Monthly)
    );

    let property = store.list::<PropertyCollateral>().expect("list");
    assert_eq!(property[0].fields.number_of_bedrooms, None);
    assert_eq!(property[1].fields.number_of_bedrooms, Some(2.0));
    assert_eq!(
        property[1].fields.value_of_energy_performance_certificate,
        Some(EnergyPerformanceCertificate::F)
    );
    assert_eq!(
        property[0].fields.provider_of_latest_valuation.as_deref(),
        Some("Praxi Valutazioni")
    );
}

#[test]
fn reloading_replaces_rather_than_appends() {
    let store = Store::in_memory().expect("store");
    let fixtures = FixtureDir::new(fixture_root());
    let first = load_npl(&store, &fixtures, &LoadOptions::default()).expect("load");
    let second = load_npl(&store, &fixtures, &LoadOptions::default()).expect("reload");

    assert_eq!(first.inserted, second.inserted);
    assert_eq!(store.count::<Loan>().expect("count"), 4);
    assert_eq!(store.count::<ExternalCollection>().expect("count"), 1);
}

#[test]
fn a_bad_row_rejects_the_whole_load() {
    let store = Store::in_memory().expect("store");
    let fixtures = fixture_copy().with(
        "loan.csv",
        "contract_identifier|counterparty_identifier|principal_balance\n\
         L-5001|C-1001|3900000\n\
         L-5002|C-1001|lots\n",
    );

    match load_npl(&store, &fixtures, &LoadOptions::default()) {
        Err(LoadError::Rejected(errors)) => {
            let first = &errors[0];
            assert_eq!(first.file, "loan.csv");
            assert_eq!(first.line, 3);
            assert_eq!(first.column.as_deref(), Some("principal_balance"));
        }
        other => panic!("expected rejected rows, got {other:?}"),
    }
    assert_eq!(store.count::<Portfolio>().expect("count"), 0);
    assert_eq!(store.count::<Counterparty>().expect("count"), 0);
}

#[test]
fn lenient_load_skips_bad_rows_and_their_dependents() {
    let store = Store::in_memory().expect("store");
    let fixtures = fixture_copy().with(
        "loan.csv",
        "contract_identifier|counterparty_identifier|principal_balance\n\
         L-5001|C-1001|3900000\n\
         L-5002|C-1001|650000\n\
         L-5003|C-1002|1750000\n\
         L-5004|C-9999|164000\n",
    );
    let options = LoadOptions {
        skip_invalid: true,
        ..LoadOptions::default()
    };

    let report = load_npl(&store, &fixtures, &options).expect("lenient load");
    assert_eq!(report.inserted(Loan::TABLE), 3);
    // L-5004 is missing, so its collateral, forbearance and collection rows go too.
    assert_eq!(report.inserted(PropertyCollateral::TABLE), 1);
    assert_eq!(report.inserted(Forbearance::TABLE), 0);
    assert_eq!(report.inserted(ExternalCollection::TABLE), 0);
    assert_eq!(report.skipped.len(), 4);
    assert_eq!(report.skipped[0].message, "unknown counterparty_identifier 'C-9999'");
}

#[test]
fn missing_identifier_column_aborts() {
    let store = Store::in_memory().expect("store");
    let fixtures = fixture_copy().with("forbearance.csv", "contract_identifier\nL-5004\n");

    match load_npl(&store, &fixtures, &LoadOptions::default()) {
        Err(LoadError::MissingColumn { file, column }) => {
            assert_eq!(file, "forbearance.csv");
            assert_eq!(column, "forbearance_identifier");
        }
        other => panic!("expected missing column, got {other:?}"),
    }
}
