use crate::demo::{run_eligibility_check, run_match_report, EligibilityArgs, MatchReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use claimscout::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Settlement Discovery Desk",
    about = "Demonstrate and run the settlement discovery service from the command line",
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
    /// Rank the settlement catalog against questionnaire answers
    Match(MatchReportArgs),
    /// Scan purchase receipts against a settlement's eligibility rule
    Eligibility(EligibilityArgs),
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
        Command::Match(args) => run_match_report(args),
        Command::Eligibility(args) => run_eligibility_check(args),
    }
}
