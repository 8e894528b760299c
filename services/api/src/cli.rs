use crate::estimate::{run_batch, run_estimate, BatchArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_valuation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Price Estimator",
    about = "Serve and run the rental listing price estimator from the command line",
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
    /// Estimate the market price of a single property
    Estimate(EstimateArgs),
    /// Estimate every listing in a CSV export
    Batch(BatchArgs),
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
        Command::Estimate(args) => run_estimate(args).await,
        Command::Batch(args) => run_batch(args),
    }
}
