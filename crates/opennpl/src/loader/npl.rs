use super::mapping::{load_file, FileSpec, Link};
use super::{run, FixtureSource, LoadError, LoadOptions, LoadReport};
use crate::schema::npl::{
    self, Counterparty, CounterpartyGroup, Enforcement, ExternalCollection, Forbearance, Loan,
    NonPropertyCollateral, Portfolio, PortfolioSnapshot, PropertyCollateral,
};
use crate::schema::Entity;
use crate::store::Store;
use tracing::info;

const TO_PORTFOLIO: Link = Link::new("portfolio_name", "portfolio_id", Portfolio::TABLE);
const TO_SNAPSHOT: Link = Link::new("snapshot_name", "snapshot_id", PortfolioSnapshot::TABLE);
const TO_LOAN: Link = Link::new("contract_identifier", "loan_id", Loan::TABLE);
const TO_COUNTERPARTY: Link =
    Link::new("counterparty_identifier", "counterparty_id", Counterparty::TABLE);

static PORTFOLIO: FileSpec<'static> = FileSpec {
    file: "portfolio.csv",
    required: &["name"],
    links: &[],
    fallbacks: &[],
    register: Some((Portfolio::TABLE, "name")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Portfolio>,
};

static SNAPSHOT: FileSpec<'static> = FileSpec {
    file: "portfolio_snapshot.csv",
    required: &["name"],
    links: &[TO_PORTFOLIO],
    fallbacks: &[],
    register: Some((PortfolioSnapshot::TABLE, "name")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<PortfolioSnapshot>,
};

static COUNTERPARTY_GROUP: FileSpec<'static> = FileSpec {
    file: "counterparty_group.csv",
    required: &["counterparty_group_identifier"],
    links: &[TO_PORTFOLIO, TO_SNAPSHOT],
    fallbacks: &[],
    register: Some((CounterpartyGroup::TABLE, "counterparty_group_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<CounterpartyGroup>,
};

static COUNTERPARTY: FileSpec<'static> = FileSpec {
    file: "counterparty.csv",
    required: &["counterparty_identifier"],
    links: &[
        Link::new(
            "counterparty_group_identifier",
            "counterparty_group_id",
            CounterpartyGroup::TABLE,
        ),
        TO_PORTFOLIO,
        TO_SNAPSHOT,
    ],
    fallbacks: &[],
    register: Some((Counterparty::TABLE, "counterparty_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Counterparty>,
};

static LOAN: FileSpec<'static> = FileSpec {
    file: "loan.csv",
    required: &["contract_identifier"],
    links: &[TO_COUNTERPARTY, TO_PORTFOLIO, TO_SNAPSHOT],
    fallbacks: &[],
    register: Some((Loan::TABLE, "contract_identifier")),
    complete: None,
    limited: true,
    layout: None,
    load: load_file::<Loan>,
};

static PROPERTY_COLLATERAL: FileSpec<'static> = FileSpec {
    file: "property_collateral.csv",
    required: &["protection_identifier", "contract_identifier"],
    links: &[TO_LOAN],
    fallbacks: &[],
    register: Some((PropertyCollateral::TABLE, "protection_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<PropertyCollateral>,
};

static NON_PROPERTY_COLLATERAL: FileSpec<'static> = FileSpec {
    file: "non_property_collateral.csv",
    required: &["protection_identifier", "contract_identifier"],
    links: &[TO_LOAN],
    fallbacks: &[],
    register: Some((NonPropertyCollateral::TABLE, "protection_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<NonPropertyCollateral>,
};

static ENFORCEMENT: FileSpec<'static> = FileSpec {
    file: "enforcement.csv",
    required: &["enforcement_identifier"],
    links: &[
        Link::new(
            "property_collateral_identifier",
            "property_collateral_id",
            PropertyCollateral::TABLE,
        ),
        Link::new(
            "non_property_collateral_identifier",
            "non_property_collateral_id",
            NonPropertyCollateral::TABLE,
        ),
        TO_COUNTERPARTY,
    ],
    fallbacks: &[],
    register: Some((Enforcement::TABLE, "enforcement_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Enforcement>,
};

static FORBEARANCE: FileSpec<'static> = FileSpec {
    file: "forbearance.csv",
    required: &["forbearance_identifier"],
    links: &[TO_LOAN, TO_COUNTERPARTY],
    fallbacks: &[],
    register: Some((Forbearance::TABLE, "forbearance_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Forbearance>,
};

static EXTERNAL_COLLECTION: FileSpec<'static> = FileSpec {
    file: "external_collection.csv",
    required: &["external_collection_identifier"],
    links: &[TO_LOAN, TO_COUNTERPARTY],
    fallbacks: &[],
    register: Some((ExternalCollection::TABLE, "external_collection_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<ExternalCollection>,
};

/// Loads the NPL template files, parents first, linking records through their
/// identifiers.
pub fn load_npl(
    store: &Store,
    source: &dyn FixtureSource,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    info!(limit = ?options.limit, "loading NPL template data");
    run(
        store,
        source,
        &[
            &PORTFOLIO,
            &SNAPSHOT,
            &COUNTERPARTY_GROUP,
            &COUNTERPARTY,
            &LOAN,
            &PROPERTY_COLLATERAL,
            &NON_PROPERTY_COLLATERAL,
            &ENFORCEMENT,
            &FORBEARANCE,
            &EXTERNAL_COLLECTION,
        ],
        &npl::tables(),
        options,
    )
}
