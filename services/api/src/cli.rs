use crate::load::{run_load, LoadArgs, LoadKind, WideLoadArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use opennpl::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "openNPL",
    about = "Serve and populate the openNPL non-performing loan data store",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Load the static SFLP files: portfolio, snapshots, loans, counterparties, collateral
    LoadStaticSflp(LoadArgs),
    /// Load the static SFLP files plus the monthly loan, counterparty and collateral states
    LoadCoreSflp(LoadArgs),
    /// Load the core SFLP files plus forbearance and enforcement events
    LoadFullSflp(LoadArgs),
    /// Load one wide SFLP performance file with a row per loan and reporting period
    LoadSflp(WideLoadArgs),
    /// Load the NPL template files linked by their identifiers
    LoadNpl(LoadArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::LoadStaticSflp(args) => run_load(LoadKind::StaticSflp, args),
        Command::LoadCoreSflp(args) => run_load(LoadKind::CoreSflp, args),
        Command::LoadFullSflp(args) => run_load(LoadKind::FullSflp, args),
        Command::LoadSflp(WideLoadArgs { file, common }) => {
            run_load(LoadKind::WideSflp { file }, common)
        }
        Command::LoadNpl(args) => run_load(LoadKind::Npl, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["opennpl"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn loader_flags_parse() {
        let cli = Cli::try_parse_from([
            "opennpl",
            "load-full-sflp",
            "--dir",
            "sflp_portfolio/fixtures",
            "--database",
            "/tmp/opennpl.sqlite3",
            "--skip-invalid",
            "--limit",
            "100",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::LoadFullSflp(args)) => {
                assert!(args.skip_invalid);
                assert_eq!(args.limit, Some(100));
                assert_eq!(
                    args.database.as_deref(),
                    Some(std::path::Path::new("/tmp/opennpl.sqlite3"))
                );
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["opennpl", "load-sflp", "--file", "2020Q1.csv"])
            .expect("parses");
        match cli.command {
            Some(Command::LoadSflp(args)) => assert_eq!(args.file, "2020Q1.csv"),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
