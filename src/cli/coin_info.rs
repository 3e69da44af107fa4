use super::ui::{StyleType, coin_info_table, style_text};
use crate::core::config::AppConfig;
use crate::core::{CoinInfoKeeper, EvmCoinInfo, TracingInstrumentation};
use crate::providers::registry::DenomRegistry;
use crate::store::{DiskStore, KvStore, MemoryStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

fn build_keeper<S: KvStore>(config: &AppConfig, store: S) -> CoinInfoKeeper<S> {
    CoinInfoKeeper::new(store, config.default_coin_info())
        .with_policy(config.policy)
        .with_instrumentation(Arc::new(TracingInstrumentation))
        .with_record_validation()
}

fn open_keeper(config: &AppConfig) -> Result<CoinInfoKeeper<DiskStore>> {
    let data_path = config.default_data_path()?;
    debug!("Opening coin info store at {}", data_path.display());
    let store = DiskStore::open(&data_path)
        .with_context(|| format!("Failed to open store at {}", data_path.display()))?;

    Ok(build_keeper(config, store))
}

/// Resolves the coin info from the configured registry without storing it.
/// Never touches the data path.
pub fn resolve(config: &AppConfig) -> Result<EvmCoinInfo> {
    let registry = DenomRegistry::new(config.denom_metadata.clone())?;
    let keeper = build_keeper(config, MemoryStore::new());
    let info = keeper
        .load_coin_info(&config.params, &registry)
        .context("Failed to resolve evm coin info")?;
    info.validate()
        .with_context(|| format!("Resolved evm coin info is inconsistent: {info:?}"))?;
    Ok(info)
}

fn init_with<S: KvStore>(
    keeper: &CoinInfoKeeper<S>,
    config: &AppConfig,
    force: bool,
) -> Result<EvmCoinInfo> {
    if keeper.is_initialized()? {
        if !force {
            anyhow::bail!("Evm coin info is already initialized, pass --force to overwrite");
        }
        warn!("Overwriting stored evm coin info");
    }

    let registry = DenomRegistry::new(config.denom_metadata.clone())?;
    keeper
        .init_coin_info(&config.params, &registry)
        .context("Failed to initialize evm coin info")?;
    Ok(keeper.try_coin_info()?)
}

/// Resolves the coin info and persists it. Refuses to overwrite a stored
/// record unless `force` is set.
pub fn init(config: &AppConfig, force: bool) -> Result<EvmCoinInfo> {
    let keeper = open_keeper(config)?;
    init_with(&keeper, config, force)
}

/// Reads the stored coin info. Returns the record and whether it came from
/// the store rather than the configured default.
pub fn show(config: &AppConfig) -> Result<(EvmCoinInfo, bool)> {
    let keeper = open_keeper(config)?;
    let stored = keeper.is_initialized()?;
    let info = keeper.try_coin_info()?;
    Ok((info, stored))
}

pub fn display_coin_info(title: &str, info: &EvmCoinInfo, note: Option<&str>) {
    println!("{}", style_text(title, StyleType::Title));
    println!("{}", coin_info_table(info));
    if let Some(note) = note {
        println!("{}", style_text(note, StyleType::Subtle));
    }
}

pub fn display_error(error: &anyhow::Error) {
    eprintln!("{}", style_text(&format!("Error: {error:#}"), StyleType::Error));
}
