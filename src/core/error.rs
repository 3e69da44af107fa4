use crate::store::StoreError;
use thiserror::Error;

/// Errors raised while resolving or persisting the EVM coin info.
///
/// Every variant describes a configuration or integrity problem. None of
/// them are transient, so callers should treat them as fatal for the
/// initialization step that produced them.
#[derive(Error, Debug)]
pub enum CoinInfoError {
    /// No registry entry was found under any candidate denomination
    #[error("denom metadata could not be found for any of [{}]", .candidates.join(", "))]
    MetadataNotFound { candidates: Vec<String> },

    /// The working denomination is not listed in the entry's units
    #[error("evm denom {0} not found in denom_units")]
    DenomExponentMissing(String),

    /// The display denomination is not listed in the entry's units
    #[error("display denom {0} not found in denom_units")]
    DisplayExponentMissing(String),

    /// The base denomination is not listed in the entry's units
    #[error("base denom {0} not found in denom_units")]
    BaseExponentMissing(String),

    #[error("base denom exponent must be 0, got {exponent} for {denom}")]
    BaseExponentNonZero { denom: String, exponent: u32 },

    #[error(
        "display denom exponent ({display}) must be greater than or equal to evm denom exponent ({evm})"
    )]
    DisplayExponentTooSmall { display: u32, evm: u32 },

    /// The working denomination is not the smallest unit and no extended
    /// denomination was configured
    #[error("extended denom options are required for {denom} with exponent {exponent}")]
    ExtendedDenomRequired { denom: String, exponent: u32 },

    #[error("invalid evm coin info: {0}")]
    InvalidCoinInfo(String),

    #[error("failed to encode evm coin info")]
    Serialization(#[from] serde_json::Error),

    /// Stored bytes exist but do not decode into a record
    #[error("stored evm coin info is corrupt")]
    CorruptRecord {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, CoinInfoError>;
