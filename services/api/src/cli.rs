use crate::demo::{
    run_demo, run_question_listing, run_scenario_listing, run_selection_plan, DemoArgs, PlanArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use inspection_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mock Inspection Engine",
    about = "Run mock CQC inspection interviews from the command line or over HTTP",
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
    /// Inspect the static scenario and question catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run a full scripted interview session offline, no API key required
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List the available interview scenarios
    Scenarios,
    /// List the question bank grouped by key question
    Questions,
    /// Show the question draw a scenario and seed would produce
    Plan(PlanArgs),
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
        Command::Catalog {
            command: CatalogCommand::Scenarios,
        } => run_scenario_listing(),
        Command::Catalog {
            command: CatalogCommand::Questions,
        } => run_question_listing(),
        Command::Catalog {
            command: CatalogCommand::Plan(args),
        } => run_selection_plan(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
