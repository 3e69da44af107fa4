//! The resolved description of the native EVM coin

use super::error::{CoinInfoError, Result};
use serde::{Deserialize, Serialize};

/// Number of decimals the EVM works with internally.
pub const EIGHTEEN_DECIMALS: u32 = 18;

/// Denomination names, decimal scale and display unit of the EVM coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmCoinInfo {
    /// Unit the EVM does its arithmetic in before scaling
    pub denom: String,
    /// Smallest indivisible unit (exponent 0 in the registry)
    pub extended_denom: String,
    /// Unit shown to users
    pub display_denom: String,
    /// Decimal digits between `extended_denom` and `denom`
    pub decimals: u32,
}

impl Default for EvmCoinInfo {
    fn default() -> Self {
        Self {
            denom: "aatom".to_string(),
            extended_denom: "aatom".to_string(),
            display_denom: "atom".to_string(),
            decimals: EIGHTEEN_DECIMALS,
        }
    }
}

impl EvmCoinInfo {
    /// Checks the denomination names and the decimals against each other.
    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.denom)?;
        validate_denom(&self.extended_denom)?;
        validate_denom(&self.display_denom)?;

        if self.decimals == 0 || self.decimals > EIGHTEEN_DECIMALS {
            return Err(CoinInfoError::InvalidCoinInfo(format!(
                "decimals must be between 1 and {EIGHTEEN_DECIMALS}, got {}",
                self.decimals
            )));
        }

        let is_extended = self.denom == self.extended_denom;
        if self.decimals == EIGHTEEN_DECIMALS && !is_extended {
            return Err(CoinInfoError::InvalidCoinInfo(format!(
                "denom {} must equal extended denom {} for 18 decimals",
                self.denom, self.extended_denom
            )));
        }
        if self.decimals != EIGHTEEN_DECIMALS && is_extended {
            return Err(CoinInfoError::InvalidCoinInfo(format!(
                "denom {} must differ from extended denom for {} decimals",
                self.denom, self.decimals
            )));
        }
        Ok(())
    }

    /// Multiplier from one `denom` unit to the 18 decimal representation.
    ///
    /// Returns `None` when `decimals` exceeds 18.
    pub fn conversion_factor(&self) -> Option<u128> {
        EIGHTEEN_DECIMALS
            .checked_sub(self.decimals)
            .and_then(|exp| 10u128.checked_pow(exp))
    }
}

// Same shape as the SDK denom rule: [a-zA-Z][a-zA-Z0-9/:._-]{2,127}
fn validate_denom(denom: &str) -> Result<()> {
    let mut chars = denom.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && (3..=128).contains(&denom.len())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(CoinInfoError::InvalidCoinInfo(format!(
            "invalid denom: {denom:?}"
        )))
    }
}
