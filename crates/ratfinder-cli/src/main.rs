mod list;
mod prefs;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::list::ListArgs;
use crate::prefs::PrefsCommands;

#[derive(Debug, Parser)]
#[command(name = "ratfinder")]
#[command(about = "Nearby rapid antigen test availability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show sites near a location, filtered and sorted by the saved controls
    List(ListArgs),
    /// Inspect or change the saved controls
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ratfinder_core::load_presenter_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List(args) => list::run_list(&config, args).await,
        Commands::Prefs { command } => prefs::run_prefs(&config, command),
    }
}
