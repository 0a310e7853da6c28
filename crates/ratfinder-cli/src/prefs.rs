//! `prefs`: show or change the saved list controls without fetching.

use clap::Subcommand;
use ratfinder_core::PresenterConfig;
use ratfinder_presenter::{FileStore, Preferences};

#[derive(Debug, Subcommand)]
pub enum PrefsCommands {
    /// Print every saved control
    Show,
    /// Save one control, e.g. `prefs set distanceFilter 5km`
    Set {
        /// filter, sort, distanceFilter or statusFilter
        key: String,
        value: String,
    },
}

pub(crate) fn run_prefs(config: &PresenterConfig, command: PrefsCommands) -> anyhow::Result<()> {
    let mut prefs = Preferences::load(FileStore::open(&config.prefs_path)?);
    match command {
        PrefsCommands::Show => {
            println!("# {}", config.prefs_path.display());
            for (key, value) in prefs.entries() {
                println!("{key} = {value}");
            }
        }
        PrefsCommands::Set { key, value } => {
            prefs.set_raw(&key, &value)?;
            tracing::info!(%key, %value, "saved preference");
            println!("{key} = {value}");
        }
    }
    Ok(())
}
