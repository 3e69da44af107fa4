//! Coin info resolution and persistence

pub mod coin_info;
pub mod config;
pub mod error;
pub mod keeper;
pub mod log;
pub mod metadata;
pub mod params;
pub mod resolver;
pub mod trace;

// Re-export main types for cleaner imports
pub use coin_info::{EIGHTEEN_DECIMALS, EvmCoinInfo};
pub use error::{CoinInfoError, Result};
pub use keeper::{CoinInfoKeeper, EVM_COIN_INFO_KEY};
pub use metadata::{DenomMetadata, DenomUnit, MetadataProvider};
pub use params::{ExtendedDenomOptions, VmParams};
pub use resolver::{Resolver, ValidationPolicy};
pub use trace::{Instrumentation, NoopInstrumentation, TracingInstrumentation};
