use crate::demo::{run_demo, run_optimize, DemoArgs, OptimizeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use profit_mix::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Profit Mix Optimizer",
    about = "Find optimal 1/2/3-fund blends for a target exposure profile",
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
    /// Run one optimization against a catalog CSV and print the shortlist
    Optimize(OptimizeArgs),
    /// Run the optimizer over a built-in sample catalog and preset targets
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the catalog CSV loaded at startup
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Optimize(args) => run_optimize(args),
        Command::Demo(args) => run_demo(args),
    }
}
