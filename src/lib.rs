pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub use crate::core::{CoinInfoError, CoinInfoKeeper, EvmCoinInfo, Resolver, VmParams};

pub enum AppCommand {
    Resolve,
    Init { force: bool },
    Show,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("evmcoin starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Resolve => {
            let coin_info = cli::coin_info::resolve(&config)?;
            cli::coin_info::display_coin_info(
                "Resolved EVM coin info",
                &coin_info,
                Some("Not persisted, run `init` to store it"),
            );
        }
        AppCommand::Init { force } => {
            let coin_info = cli::coin_info::init(&config, force)?;
            cli::coin_info::display_coin_info("Initialized EVM coin info", &coin_info, None);
        }
        AppCommand::Show => {
            let (coin_info, stored) = cli::coin_info::show(&config)?;
            let note = (!stored).then_some("Not initialized, showing the configured default");
            cli::coin_info::display_coin_info("EVM coin info", &coin_info, note);
        }
    }
    Ok(())
}
