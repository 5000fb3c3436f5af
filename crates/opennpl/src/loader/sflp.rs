use super::mapping::{
    build, has_values, load_file, row_error, token, FileSpec, Link, LoadContext, Outcome,
};
use super::normalizer;
use super::parser::{DelimitedFile, Layout, Row};
use super::{run, FixtureSource, LoadError, LoadOptions, LoadReport, RowError};
use crate::schema::sflp::choices::{
    AlternativeDelinquencyResolution as Resolution, BorrowerAssistancePlan as Plan,
};
use crate::schema::sflp::{
    self, Counterparty, CounterpartyState, Enforcement, Forbearance, Loan, LoanState, Portfolio,
    PortfolioSnapshot, PropertyCollateral, PropertyCollateralState, RepaymentSchedule,
};
use crate::schema::Entity;
use crate::store::Store;
use serde_json::{Map, Value as JsonValue};
use tracing::info;

const LOAN_KEY: &str = "loan_identifier";
const PERIOD_KEY: &str = "monthly_reporting_period";

/// Collateral is registered under the identifier of the loan it secures.
const COLLATERAL_BY_LOAN: &str = PropertyCollateral::TABLE;

const TO_LOAN: Link = Link::new(LOAN_KEY, "loan_id", Loan::TABLE);
const TO_SNAPSHOT: Link = Link::new(
    PERIOD_KEY,
    "portfolio_snapshot_id",
    PortfolioSnapshot::TABLE,
);
const COUNTERPARTY_FALLBACK: (&str, &str) = ("counterparty_identifier", LOAN_KEY);

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
    required: &[PERIOD_KEY],
    links: &[Link::new("portfolio_name", "portfolio_id", Portfolio::TABLE)],
    fallbacks: &[],
    register: Some((PortfolioSnapshot::TABLE, PERIOD_KEY)),
    complete: Some(derive_cutoff),
    limited: false,
    layout: None,
    load: load_file::<PortfolioSnapshot>,
};

static LOAN: FileSpec<'static> = FileSpec {
    file: "loan.csv",
    required: &[LOAN_KEY],
    links: &[Link::new("portfolio_name", "portfolio_id", Portfolio::TABLE)],
    fallbacks: &[],
    register: Some((Loan::TABLE, LOAN_KEY)),
    complete: None,
    limited: true,
    layout: None,
    load: load_file::<Loan>,
};

static COUNTERPARTY: FileSpec<'static> = FileSpec {
    file: "counterparty.csv",
    required: &[LOAN_KEY],
    links: &[TO_LOAN],
    fallbacks: &[COUNTERPARTY_FALLBACK],
    register: Some((Counterparty::TABLE, "counterparty_identifier")),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Counterparty>,
};

static PROPERTY_COLLATERAL: FileSpec<'static> = FileSpec {
    file: "property_collateral.csv",
    required: &[LOAN_KEY],
    links: &[TO_LOAN],
    fallbacks: &[],
    register: Some((COLLATERAL_BY_LOAN, LOAN_KEY)),
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<PropertyCollateral>,
};

static LOAN_STATE: FileSpec<'static> = FileSpec {
    file: "loan_state.csv",
    required: &[LOAN_KEY, PERIOD_KEY],
    links: &[TO_LOAN, TO_SNAPSHOT],
    fallbacks: &[],
    register: None,
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<LoanState>,
};

static COUNTERPARTY_STATE: FileSpec<'static> = FileSpec {
    file: "counterparty_state.csv",
    required: &[LOAN_KEY, PERIOD_KEY],
    links: &[
        Link::new("counterparty_identifier", "counterparty_id", Counterparty::TABLE),
        TO_SNAPSHOT,
    ],
    fallbacks: &[COUNTERPARTY_FALLBACK],
    register: None,
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<CounterpartyState>,
};

static PROPERTY_COLLATERAL_STATE: FileSpec<'static> = FileSpec {
    file: "property_collateral_state.csv",
    required: &[LOAN_KEY, PERIOD_KEY],
    links: &[
        Link::new(LOAN_KEY, "property_collateral_id", COLLATERAL_BY_LOAN),
        TO_SNAPSHOT,
    ],
    fallbacks: &[],
    register: None,
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<PropertyCollateralState>,
};

static FORBEARANCE: FileSpec<'static> = FileSpec {
    file: "forbearance.csv",
    required: &[LOAN_KEY, PERIOD_KEY],
    links: &[TO_LOAN, TO_SNAPSHOT],
    fallbacks: &[],
    register: None,
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Forbearance>,
};

static ENFORCEMENT: FileSpec<'static> = FileSpec {
    file: "enforcement.csv",
    required: &[LOAN_KEY, PERIOD_KEY],
    links: &[
        TO_LOAN,
        TO_SNAPSHOT,
        Link::new(LOAN_KEY, "property_collateral_id", COLLATERAL_BY_LOAN).lenient(),
    ],
    fallbacks: &[],
    register: None,
    complete: None,
    limited: false,
    layout: None,
    load: load_file::<Enforcement>,
};

/// Snapshot files may omit the cutoff; it defaults to the end of the
/// reporting month.
fn derive_cutoff(object: &mut Map<String, JsonValue>) {
    if object.get("cutoff_date").is_some_and(|value| !value.is_null()) {
        return;
    }
    let end = object
        .get(PERIOD_KEY)
        .and_then(JsonValue::as_str)
        .and_then(normalizer::period_end);
    if let Some(end) = end {
        object.insert("cutoff_date".to_string(), JsonValue::String(end.to_string()));
    }
}

/// Portfolio, snapshot, loan, counterparty and property collateral files.
pub fn load_static_sflp(
    store: &Store,
    source: &dyn FixtureSource,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    info!(limit = ?options.limit, "loading static SFLP data");
    run(
        store,
        source,
        &[&PORTFOLIO, &SNAPSHOT, &LOAN, &COUNTERPARTY, &PROPERTY_COLLATERAL],
        &sflp::tables(),
        options,
    )
}

/// The static files plus the monthly loan, counterparty and collateral states.
pub fn load_core_sflp(
    store: &Store,
    source: &dyn FixtureSource,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    info!(limit = ?options.limit, "loading core SFLP data");
    run(
        store,
        source,
        &[
            &PORTFOLIO,
            &SNAPSHOT,
            &LOAN,
            &COUNTERPARTY,
            &PROPERTY_COLLATERAL,
            &LOAN_STATE,
            &COUNTERPARTY_STATE,
            &PROPERTY_COLLATERAL_STATE,
        ],
        &sflp::tables(),
        options,
    )
}

/// The core files plus forbearance and enforcement events.
pub fn load_full_sflp(
    store: &Store,
    source: &dyn FixtureSource,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    info!(limit = ?options.limit, "loading full SFLP data");
    run(
        store,
        source,
        &[
            &PORTFOLIO,
            &SNAPSHOT,
            &LOAN,
            &COUNTERPARTY,
            &PROPERTY_COLLATERAL,
            &LOAN_STATE,
            &COUNTERPARTY_STATE,
            &PROPERTY_COLLATERAL_STATE,
            &FORBEARANCE,
            &ENFORCEMENT,
        ],
        &sflp::tables(),
        options,
    )
}

/// One wide performance file with a row per (loan, reporting period). The
/// portfolio takes the name of the file.
pub fn load_sflp(
    store: &Store,
    source: &dyn FixtureSource,
    file: &str,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    info!(file, limit = ?options.limit, "loading SFLP performance file");
    let spec = FileSpec { file, ..WIDE };
    run(store, source, &[&spec], &sflp::tables(), options)
}

/// Field order of the single-family loan performance file, which is published
/// without a header row.
const PERFORMANCE_LAYOUT: Layout = &[
    "reference_pool_id",
    "loan_identifier",
    "monthly_reporting_period",
    "channel",
    "seller_name",
    "servicer_name",
    "master_servicer",
    "original_interest_rate",
    "current_interest_rate",
    "original_upb",
    "upb_at_issuance",
    "current_actual_upb",
    "original_loan_term",
    "origination_date",
    "first_payment_date",
    "loan_age",
    "remaining_months_to_legal_maturity",
    "remaining_months_to_maturity",
    "maturity_date",
    "original_loan_to_value_ratio",
    "original_combined_loan_to_value_ratio",
    "number_of_borrowers",
    "debt_to_income",
    "borrower_credit_score_at_origination",
    "coborrower_credit_score_at_origination",
    "first_time_home_buyer_indicator",
    "loan_purpose",
    "property_type",
    "number_of_units",
    "occupancy_status",
    "property_state",
    "metropolitan_statistical_area",
    "zip_code_short",
    "mortgage_insurance_percentage",
    "amortization_type",
    "prepayment_penalty_indicator",
    "interest_only_loan_indicator",
    "interest_only_first_principal_and_interest_payment_date",
    "months_to_amortization",
    "current_loan_delinquency_status",
    "loan_payment_history",
    "modification_flag",
    "mortgage_insurance_cancellation_indicator",
    "zero_balance_code",
    "zero_balance_effective_date",
    "upb_at_the_time_of_removal",
    "repurchase_date",
    "scheduled_principal_current",
    "total_principal_current",
    "unscheduled_principal_current",
    "last_paid_installment_date",
    "foreclosure_date",
    "disposition_date",
    "foreclosure_costs",
    "property_preservation_and_repair_costs",
    "asset_recovery_costs",
    "miscellaneous_holding_expenses_and_credits",
    "associated_taxes_for_holding_property",
    "net_sales_proceeds",
    "credit_enhancement_proceeds",
    "repurchase_make_whole_proceeds",
    "other_foreclosure_proceeds",
    "noninterest_bearing_upb",
    "principal_forgiveness_amount",
    "original_list_start_date",
    "original_list_price",
    "current_list_start_date",
    "current_list_price",
    "borrower_credit_score_at_issuance",
    "coborrower_credit_score_at_issuance",
    "borrower_credit_score_current",
    "coborrower_credit_score_current",
    "mortgage_insurance_type",
    "servicing_activity_indicator",
    "current_period_modification_loss_amount",
    "cumulative_modification_loss_amount",
    "current_period_credit_event_net_gain_or_loss",
    "cumulative_credit_event_net_gain_or_loss",
    "special_eligibility_program",
    "foreclosure_principal_writeoff_amount",
    "relocation_mortgage_indicator",
    "zero_balance_code_change_date",
    "loan_holdback_indicator",
    "loan_holdback_effective_date",
    "delinquent_accrued_interest",
    "property_valuation_method",
    "high_balance_loan_indicator",
    "arm_initial_fixed_rate_period_less_than_5_yr",
    "arm_product_type",
    "initial_fixed_rate_period",
    "interest_rate_adjustment_frequency",
    "next_interest_rate_adjustment_date",
    "next_payment_change_date",
    "index",
    "arm_cap_structure",
    "initial_interest_rate_cap",
    "periodic_interest_rate_cap",
    "lifetime_interest_rate_cap",
    "mortgage_margin",
    "arm_balloon_indicator",
    "arm_plan_number",
    "borrower_assistance_plan",
    "high_loan_to_value_refinance_option_indicator",
    "deal_name",
    "repurchase_make_whole_proceeds_flag",
    "alternative_delinquency_resolution",
    "alternative_delinquency_resolution_count",
    "total_deferral_amount",
];

const WIDE: FileSpec<'static> = FileSpec {
    file: "test.csv",
    required: &[LOAN_KEY, PERIOD_KEY],
    links: &[],
    fallbacks: &[COUNTERPARTY_FALLBACK],
    register: None,
    complete: Some(derive_cutoff),
    limited: true,
    layout: Some(PERFORMANCE_LAYOUT),
    load: load_wide,
};

/// Everything one wide row contributes, validated before anything is written.
struct WideRow {
    portfolio: Portfolio,
    snapshot: PortfolioSnapshot,
    statics: Option<(Loan, Counterparty, PropertyCollateral)>,
    loan_state: LoanState,
    counterparty_state: CounterpartyState,
    collateral_state: PropertyCollateralState,
    schedule: RepaymentSchedule,
    forbearance: Forbearance,
    enforcement: Enforcement,
}

fn part<E: Entity>(
    ctx: &LoadContext<'_>,
    row: &Row<'_>,
    spec: &FileSpec,
    errors: &mut Vec<RowError>,
) -> Option<E> {
    match build::<E>(ctx, row, spec) {
        Outcome::Ready(fields) => Some(fields),
        Outcome::Skip => None,
        Outcome::Invalid(mut found) => {
            errors.append(&mut found);
            None
        }
    }
}

fn parse_wide(
    ctx: &LoadContext<'_>,
    row: &Row<'_>,
    spec: &FileSpec,
    new_loan: bool,
) -> Result<WideRow, Vec<RowError>> {
    let mut errors = Vec::new();

    let portfolio = Portfolio {
        name: Some(row.file_name().to_string()),
        description: Some("Single-family loan performance import".to_string()),
        deal_name: row.token("deal_name").map(str::to_string),
        reference_pool_id: row.token("reference_pool_id").map(str::to_string),
    };
    let snapshot = part::<PortfolioSnapshot>(ctx, row, spec, &mut errors);
    let statics = if new_loan {
        let loan = part::<Loan>(ctx, row, spec, &mut errors);
        let counterparty = part::<Counterparty>(ctx, row, spec, &mut errors);
        let collateral = part::<PropertyCollateral>(ctx, row, spec, &mut errors);
        loan.zip(counterparty)
            .zip(collateral)
            .map(|((loan, counterparty), collateral)| (loan, counterparty, collateral))
    } else {
        None
    };
    let loan_state = part::<LoanState>(ctx, row, spec, &mut errors);
    let counterparty_state = part::<CounterpartyState>(ctx, row, spec, &mut errors);
    let collateral_state = part::<PropertyCollateralState>(ctx, row, spec, &mut errors);
    let schedule = part::<RepaymentSchedule>(ctx, row, spec, &mut errors);
    let forbearance = part::<Forbearance>(ctx, row, spec, &mut errors);
    let enforcement = part::<Enforcement>(ctx, row, spec, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }
    let invalid = || vec![row_error(row, None, "row could not be mapped")];
    Ok(WideRow {
        portfolio,
        snapshot: snapshot.ok_or_else(invalid)?,
        statics,
        loan_state: loan_state.ok_or_else(invalid)?,
        counterparty_state: counterparty_state.ok_or_else(invalid)?,
        collateral_state: collateral_state.ok_or_else(invalid)?,
        schedule: schedule.ok_or_else(invalid)?,
        forbearance: forbearance.ok_or_else(invalid)?,
        enforcement: enforcement.ok_or_else(invalid)?,
    })
}

fn load_wide(
    ctx: &mut LoadContext<'_>,
    file: &DelimitedFile,
    spec: &FileSpec,
) -> Result<(), LoadError> {
    let mut last_portfolio: Option<(Portfolio, i64)> = None;

    for row in file.rows() {
        if let Some(message) = row.width_error() {
            ctx.reject(vec![row_error(&row, None, message)]);
            continue;
        }
        let (Some(loan_key), Some(period)) = (row.token(LOAN_KEY), row.token(PERIOD_KEY)) else {
            ctx.reject(vec![row_error(
                &row,
                None,
                "loan_identifier and monthly_reporting_period are required",
            )]);
            continue;
        };

        let known_loan = ctx.lookup_id(Loan::TABLE, loan_key);
        let limit_reached = ctx
            .options
            .limit
            .is_some_and(|limit| ctx.registered(Loan::TABLE) >= limit);
        if known_loan.is_none() && limit_reached {
            continue;
        }

        let parsed = match parse_wide(ctx, &row, spec, known_loan.is_none()) {
            Ok(parsed) => parsed,
            Err(errors) => {
                ctx.reject(errors);
                continue;
            }
        };

        let unchanged = last_portfolio
            .as_ref()
            .filter(|(written, _)| *written == parsed.portfolio)
            .map(|(_, id)| *id);
        let portfolio_id = match unchanged {
            Some(id) => id,
            None => {
                let id = ctx.upsert(Portfolio::TABLE, row.file_name(), &parsed.portfolio)?;
                last_portfolio = Some((parsed.portfolio.clone(), id));
                id
            }
        };

        let snapshot_id = match ctx.lookup_id(PortfolioSnapshot::TABLE, period) {
            Some(id) => id,
            None => {
                let mut snapshot = parsed.snapshot;
                snapshot.portfolio_id = Some(portfolio_id);
                ctx.upsert(PortfolioSnapshot::TABLE, period, &snapshot)?
            }
        };

        let counterparty_key = token(&row, spec, "counterparty_identifier").unwrap_or(loan_key);
        let loan_id = match (known_loan, parsed.statics) {
            (Some(id), _) => id,
            (None, Some((mut loan, mut counterparty, mut collateral))) => {
                loan.portfolio_id = Some(portfolio_id);
                let loan_id = ctx.upsert(Loan::TABLE, loan_key, &loan)?;
                counterparty.loan_id = Some(loan_id);
                ctx.upsert(Counterparty::TABLE, counterparty_key, &counterparty)?;
                collateral.loan_id = Some(loan_id);
                ctx.upsert(COLLATERAL_BY_LOAN, loan_key, &collateral)?;
                loan_id
            }
            (None, None) => continue,
        };
        let counterparty_id = ctx.lookup_id(Counterparty::TABLE, counterparty_key);
        let collateral_id = ctx.lookup_id(COLLATERAL_BY_LOAN, loan_key);

        let WideRow {
            mut loan_state,
            mut counterparty_state,
            mut collateral_state,
            mut schedule,
            mut forbearance,
            mut enforcement,
            ..
        } = parsed;

        loan_state.loan_id = Some(loan_id);
        loan_state.portfolio_snapshot_id = Some(snapshot_id);
        ctx.insert(&loan_state)?;

        if let Some(counterparty_id) = counterparty_id {
            counterparty_state.counterparty_id = Some(counterparty_id);
            counterparty_state.portfolio_snapshot_id = Some(snapshot_id);
            ctx.insert(&counterparty_state)?;
        }
        if let Some(collateral_id) = collateral_id {
            collateral_state.property_collateral_id = Some(collateral_id);
            collateral_state.portfolio_snapshot_id = Some(snapshot_id);
            ctx.insert(&collateral_state)?;
        }

        schedule.loan_id = Some(loan_id);
        schedule.portfolio_snapshot_id = Some(snapshot_id);
        ctx.insert(&schedule)?;

        if reports_forbearance(&forbearance) {
            forbearance.loan_id = Some(loan_id);
            forbearance.portfolio_snapshot_id = Some(snapshot_id);
            ctx.insert(&forbearance)?;
        }
        if has_values(&enforcement) {
            enforcement.loan_id = Some(loan_id);
            enforcement.property_collateral_id = collateral_id;
            enforcement.portfolio_snapshot_id = Some(snapshot_id);
            ctx.insert(&enforcement)?;
        }
    }

    Ok(())
}

/// Whether a wide row reports forbearance: shared loan state columns and
/// "no plan" codes do not count.
fn reports_forbearance(forbearance: &Forbearance) -> bool {
    let plan = forbearance.borrower_assistance_plan.filter(|plan| {
        !matches!(
            plan,
            Plan::NoWorkout | Plan::NotApplicable | Plan::NotAvailable
        )
    });
    let resolution = forbearance
        .alternative_delinquency_resolution
        .filter(|resolution| {
            !matches!(
                resolution,
                Resolution::NotApplicable | Resolution::NotAvailable
            )
        });
    has_values(&Forbearance {
        current_loan_delinquency_status: None,
        delinquent_accrued_interest: None,
        modification_flag: forbearance.modification_flag.filter(|flag| *flag),
        borrower_assistance_plan: plan,
        alternative_delinquency_resolution: resolution,
        ..forbearance.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryFixtures;
    use chrono::NaiveDate;

    fn static_fixtures() -> MemoryFixtures {
        MemoryFixtures::new()
            .with("portfolio.csv", "name|description\nPool 2020|Agency pool\n")
            .with(
                "portfolio_snapshot.csv",
                "monthly_reporting_period|portfolio_name\n012020|Pool 2020\n022020|Pool 2020\n",
            )
            .with(
                "loan.csv",
                "loan_identifier|portfolio_name|channel|original_upb|origination_date|relocation_mortgage_indicator\n\
                 100001|Pool 2020|R|200000|112019|N\n\
                 100002|Pool 2020|B|150000|122019|N\n\
                 100003|Pool 2020|C|90000|122019|Y\n",
            )
            .with(
                "counterparty.csv",
                "loan_identifier|number_of_borrowers|first_time_home_buyer_indicator\n\
                 100001|2|Y\n100002|1|N\n100003|1|\n",
            )
            .with(
                "property_collateral.csv",
                "loan_identifier|property_type|occupancy_status|property_state\n\
                 100001|SF|P|CA\n100002|CO|S|NY\n100003|PU|I|TX\n",
            )
    }

    #[test]
    fn static_load_links_records_and_is_repeatable() {
        let store = Store::in_memory().expect("store");
        let fixtures = static_fixtures();

        let first = load_static_sflp(&store, &fixtures, &LoadOptions::default()).expect("load");
        let second = load_static_sflp(&store, &fixtures, &LoadOptions::default()).expect("reload");
        assert_eq!(first.inserted, second.inserted);
        assert_eq!(second.inserted(Loan::TABLE), 3);
        assert_eq!(store.count::<Loan>().expect("count"), 3);
        assert_eq!(store.count::<Counterparty>().expect("count"), 3);
        assert_eq!(store.count::<PortfolioSnapshot>().expect("count"), 2);

        let counterparties = store.list::<Counterparty>().expect("list");
        assert_eq!(counterparties[0].fields.counterparty_identifier.as_deref(), Some("100001"));
        let loan = store
            .get::<Loan>(counterparties[0].fields.loan_id.expect("linked"))
            .expect("query")
            .expect("loan");
        assert_eq!(loan.fields.loan_identifier.as_deref(), Some("100001"));

        let snapshots = store.list::<PortfolioSnapshot>().expect("list");
        assert_eq!(snapshots[1].fields.cutoff_date, NaiveDate::from_ymd_opt(2020, 2, 29));
    }

    #[test]
    fn limit_caps_loans_and_their_dependents() {
        let store = Store::in_memory().expect("store");
        let options = LoadOptions {
            limit: Some(2),
            skip_invalid: false,
        };
        let report = load_static_sflp(&store, &static_fixtures(), &options).expect("load");
        assert_eq!(report.inserted(Loan::TABLE), 2);
        assert_eq!(report.inserted(Counterparty::TABLE), 2);
        assert_eq!(report.inserted(PropertyCollateral::TABLE), 2);
    }

    #[test]
    fn strict_load_rolls_back_on_a_bad_row() {
        let store = Store::in_memory().expect("store");
        load_static_sflp(&store, &static_fixtures(), &LoadOptions::default()).expect("seed");

        let broken = static_fixtures().with(
            "property_collateral.csv",
            "loan_identifier|property_type\n100001|SF\n100002|XX\n",
        );
        let err = load_static_sflp(&store, &broken, &LoadOptions::default()).expect_err("rejected");
        match err {
            LoadError::Rejected(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].file, "property_collateral.csv");
                assert_eq!(errors[0].line, 3);
                assert_eq!(errors[0].column.as_deref(), Some("property_type"));
            }
            other => panic!("expected rejected rows, got {other:?}"),
        }
        // The earlier load is untouched.
        assert_eq!(store.count::<PropertyCollateral>().expect("count"), 3);

        let options = LoadOptions {
            skip_invalid: true,
            ..LoadOptions::default()
        };
        let report = load_static_sflp(&store, &broken, &options).expect("lenient load");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(store.count::<PropertyCollateral>().expect("count"), 1);
    }

    #[test]
    fn missing_header_aborts_before_writing() {
        let store = Store::in_memory().expect("store");
        load_static_sflp(&store, &static_fixtures(), &LoadOptions::default()).expect("seed");

        let broken =
            static_fixtures().with("counterparty.csv", "borrower|number_of_borrowers\nA|1\n");
        let err = load_static_sflp(&store, &broken, &LoadOptions::default()).expect_err("aborted");
        assert!(matches!(
            err,
            LoadError::MissingColumn { column: "loan_identifier", .. }
        ));
        assert_eq!(store.count::<Loan>().expect("count"), 3);
    }

    #[test]
    fn full_load_reads_monthly_files() {
        let store = Store::in_memory().expect("store");
        let fixtures = static_fixtures()
            .with(
                "loan_state.csv",
                "loan_identifier|monthly_reporting_period|current_actual_upb|zero_balance_code|loan_holdback_indicator\n\
                 100001|012020|199000||\n\
                 100001|022020|0|01|N\n\
                 100002|012020|149500||\n",
            )
            .with(
                "counterparty_state.csv",
                "loan_identifier|monthly_reporting_period|borrower_credit_score_current\n100001|012020|720\n",
            )
            .with(
                "property_collateral_state.csv",
                "loan_identifier|monthly_reporting_period|property_valuation_method\n100002|012020|A\n",
            )
            .with(
                "forbearance.csv",
                "loan_identifier|monthly_reporting_period|borrower_assistance_plan\n100003|022020|F\n",
            )
            .with(
                "enforcement.csv",
                "loan_identifier|monthly_reporting_period|foreclosure_date|net_sales_proceeds\n100003|022020|2020-02-10|85000\n",
            );

        let report = load_full_sflp(&store, &fixtures, &LoadOptions::default()).expect("load");
        assert_eq!(report.inserted(LoanState::TABLE), 3);
        assert_eq!(report.inserted(CounterpartyState::TABLE), 1);
        assert_eq!(report.inserted(PropertyCollateralState::TABLE), 1);
        assert_eq!(report.inserted(Forbearance::TABLE), 1);
        assert_eq!(report.inserted(Enforcement::TABLE), 1);

        let states = store.list::<LoanState>().expect("list");
        let paid_off = &states[1].fields;
        assert_eq!(paid_off.zero_balance_code.map(|code| code.code()), Some(0));
        assert_eq!(paid_off.loan_holdback_indicator.map(|code| code.code()), Some(1));
        let enforcement = &store.list::<Enforcement>().expect("list")[0].fields;
        assert!(enforcement.property_collateral_id.is_some());
    }

    #[test]
    fn wide_file_creates_statics_once_per_loan() {
        let store = Store::in_memory().expect("store");
        let fixtures = MemoryFixtures::new().with(
            "test.csv",
            "reference_pool_id|loan_identifier|monthly_reporting_period|channel|original_upb|current_actual_upb|property_type|loan_payment_history|deal_name|current_loan_delinquency_status|borrower_assistance_plan\n\
             R01|200001|012021|R|300000|299000|SF|000000|CAS 2021|00|\n\
             R01|200001|022021|R|300000|298000|SF|000000|CAS 2021|01|F\n\
             R01|200002|012021|B|100000|99500|CO||CAS 2021|00|\n",
        );

        let report =
            load_sflp(&store, &fixtures, "test.csv", &LoadOptions::default()).expect("load");
        assert_eq!(report.inserted(Portfolio::TABLE), 1);
        assert_eq!(report.inserted(PortfolioSnapshot::TABLE), 2);
        assert_eq!(report.inserted(Loan::TABLE), 2);
        assert_eq!(report.inserted(Counterparty::TABLE), 2);
        assert_eq!(report.inserted(LoanState::TABLE), 3);
        assert_eq!(report.inserted(RepaymentSchedule::TABLE), 3);
        assert_eq!(report.inserted(Forbearance::TABLE), 1);

        let portfolio = &store.list::<Portfolio>().expect("list")[0].fields;
        assert_eq!(portfolio.name.as_deref(), Some("test.csv"));
        assert_eq!(portfolio.deal_name.as_deref(), Some("CAS 2021"));

        let again =
            load_sflp(&store, &fixtures, "test.csv", &LoadOptions::default()).expect("reload");
        assert_eq!(again.inserted, report.inserted);
    }

    fn performance_row(values: &[(&str, &str)]) -> String {
        PERFORMANCE_LAYOUT
            .iter()
            .map(|column| {
                values
                    .iter()
                    .find(|(name, _)| name == column)
                    .map_or("", |(_, value)| *value)
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    #[test]
    fn headerless_performance_file_follows_the_published_order() {
        assert_eq!(PERFORMANCE_LAYOUT.len(), 108);
        let first = performance_row(&[
            ("reference_pool_id", "R01"),
            ("loan_identifier", "300001"),
            ("monthly_reporting_period", "012021"),
            ("channel", "R"),
            ("original_upb", "250000"),
            ("upb_at_issuance", "249000"),
            ("current_actual_upb", "248500"),
            ("index", "SOFR"),
            ("mortgage_margin", "2.25"),
            ("deal_name", "CAS 2021"),
        ]);
        let second = performance_row(&[
            ("reference_pool_id", "R01"),
            ("loan_identifier", "300001"),
            ("monthly_reporting_period", "022021"),
            ("channel", "R"),
            ("original_upb", "250000"),
            ("current_actual_upb", "248000"),
            ("deal_name", "CAS 2021"),
        ]);
        let fixtures = MemoryFixtures::new().with("2021Q1.csv", format!("{first}\n{second}\n"));
        let store = Store::in_memory().expect("store");

        let report =
            load_sflp(&store, &fixtures, "2021Q1.csv", &LoadOptions::default()).expect("load");
        assert_eq!(report.inserted(Loan::TABLE), 1);
        assert_eq!(report.inserted(LoanState::TABLE), 2);

        let states = store.list::<LoanState>().expect("list");
        let first = &states[0].fields;
        assert_eq!(first.current_actual_upb, Some(248500.0));
        assert_eq!(first.upb_at_issuance, Some(249000.0));
        assert_eq!(first.index.as_deref(), Some("SOFR"));
        assert_eq!(first.mortgage_margin, Some(2.25));
        assert_eq!(states[1].fields.current_actual_upb, Some(248000.0));
    }
}
