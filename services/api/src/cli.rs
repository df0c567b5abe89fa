use crate::demo::{run_demo, run_screen, DemoArgs, ScreenArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talentscan::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TalentScan Screening API",
    about = "Serve and demonstrate the TalentScan resume screening pipeline from the command line",
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
    /// Classify one resume against the configured scoring service
    Screen(ScreenArgs),
    /// Run an offline end-to-end demo of the screening workflow
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Screen(args) => run_screen(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
