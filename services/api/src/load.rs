use clap::Args;
use opennpl::config::AppConfig;
use opennpl::error::AppError;
use opennpl::loader::{
    load_core_sflp, load_full_sflp, load_npl, load_sflp, load_static_sflp, FixtureDir,
    LoadOptions, LoadReport,
};
use opennpl::store::Store;
use opennpl::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct LoadArgs {
    /// Directory holding the pipe-delimited files (defaults to APP_FIXTURES_DIR)
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
    /// SQLite database to write into (defaults to APP_DATABASE_PATH)
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
    /// Skip rows that fail to parse or link instead of rejecting the load
    #[arg(long)]
    pub(crate) skip_invalid: bool,
    /// Only read the first N loans
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct WideLoadArgs {
    /// Performance file inside the fixture directory
    #[arg(long, default_value = "test.csv")]
    pub(crate) file: String,
    #[command(flatten)]
    pub(crate) common: LoadArgs,
}

#[derive(Debug)]
pub(crate) enum LoadKind {
    StaticSflp,
    CoreSflp,
    FullSflp,
    WideSflp { file: String },
    Npl,
}

pub(crate) fn run_load(kind: LoadKind, args: LoadArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let database = args.database.unwrap_or(config.database.path);
    let dir = args.dir.unwrap_or(config.fixtures_dir);
    let store = Store::open(&database)?;
    info!(?kind, database = %database.display(), dir = %dir.display(), "starting load");

    let options = args_options(args.skip_invalid, args.limit);
    let report = load(&store, &kind, &FixtureDir::new(dir), &options)?;
    print!("{}", render(&kind, &report));
    Ok(())
}

fn args_options(skip_invalid: bool, limit: Option<usize>) -> LoadOptions {
    LoadOptions {
        limit,
        skip_invalid,
    }
}

fn load(
    store: &Store,
    kind: &LoadKind,
    source: &FixtureDir,
    options: &LoadOptions,
) -> Result<LoadReport, AppError> {
    let report = match kind {
        LoadKind::StaticSflp => load_static_sflp(store, source, options)?,
        LoadKind::CoreSflp => load_core_sflp(store, source, options)?,
        LoadKind::FullSflp => load_full_sflp(store, source, options)?,
        LoadKind::WideSflp { file } => load_sflp(store, source, file, options)?,
        LoadKind::Npl => load_npl(store, source, options)?,
    };
    Ok(report)
}

fn render(kind: &LoadKind, report: &LoadReport) -> String {
    let title = match kind {
        LoadKind::StaticSflp => "Static SFLP load".to_string(),
        LoadKind::CoreSflp => "Core SFLP load".to_string(),
        LoadKind::FullSflp => "Full SFLP load".to_string(),
        LoadKind::WideSflp { file } => format!("SFLP performance load ({file})"),
        LoadKind::Npl => "NPL load".to_string(),
    };
    format!(
        "{title}: {} row(s) written\n{report}",
        report.total_inserted()
    )
}
