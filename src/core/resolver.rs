//! Derivation of [`EvmCoinInfo`] from registry metadata

use super::coin_info::{EIGHTEEN_DECIMALS, EvmCoinInfo};
use super::error::{CoinInfoError, Result};
use super::metadata::{DenomMetadata, MetadataProvider};
use super::params::VmParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::debug;

/// How strictly registry metadata is checked during resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Only the EVM denom exponent is consulted. Exponent 0 means the EVM
    /// denom is the smallest unit and the chain has 18 decimals.
    #[default]
    Permissive,
    /// Base and display units must be listed, the base exponent must be 0
    /// and the display exponent must not be below the EVM denom exponent.
    /// Decimals are always the EVM denom exponent.
    Strict,
}

impl Display for ValidationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ValidationPolicy::Permissive => "permissive",
                ValidationPolicy::Strict => "strict",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    policy: ValidationPolicy,
}

impl Resolver {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn resolve(
        &self,
        params: &VmParams,
        metadata: &dyn MetadataProvider,
    ) -> Result<EvmCoinInfo> {
        let entry = find_metadata(params, metadata)?;
        let exponents: HashMap<&str, u32> = entry
            .denom_units
            .iter()
            .map(|unit| (unit.denom.as_str(), unit.exponent))
            .collect();

        let (decimals, extended_denom) = match self.policy {
            ValidationPolicy::Permissive => {
                let evm_exp = evm_exponent(&exponents, params)?;
                if evm_exp == 0 {
                    (EIGHTEEN_DECIMALS, params.evm_denom.clone())
                } else {
                    (evm_exp, required_extended_denom(params, evm_exp)?)
                }
            }
            ValidationPolicy::Strict => {
                let display_exp = *exponents
                    .get(entry.display.as_str())
                    .ok_or_else(|| CoinInfoError::DisplayExponentMissing(entry.display.clone()))?;
                let evm_exp = evm_exponent(&exponents, params)?;
                let base_exp = *exponents
                    .get(entry.base.as_str())
                    .ok_or_else(|| CoinInfoError::BaseExponentMissing(entry.base.clone()))?;

                if base_exp != 0 {
                    return Err(CoinInfoError::BaseExponentNonZero {
                        denom: entry.base.clone(),
                        exponent: base_exp,
                    });
                }
                if display_exp < evm_exp {
                    return Err(CoinInfoError::DisplayExponentTooSmall {
                        display: display_exp,
                        evm: evm_exp,
                    });
                }

                if evm_exp == EIGHTEEN_DECIMALS {
                    (evm_exp, params.evm_denom.clone())
                } else {
                    (evm_exp, required_extended_denom(params, evm_exp)?)
                }
            }
        };

        debug!(
            policy = %self.policy,
            evm_denom = %params.evm_denom,
            %extended_denom,
            decimals,
            "Resolved evm coin info"
        );

        Ok(EvmCoinInfo {
            denom: params.evm_denom.clone(),
            extended_denom,
            display_denom: entry.display,
            decimals,
        })
    }
}

fn evm_exponent(exponents: &HashMap<&str, u32>, params: &VmParams) -> Result<u32> {
    exponents
        .get(params.evm_denom.as_str())
        .copied()
        .ok_or_else(|| CoinInfoError::DenomExponentMissing(params.evm_denom.clone()))
}

fn required_extended_denom(params: &VmParams, evm_exp: u32) -> Result<String> {
    params
        .extended_denom()
        .map(str::to_string)
        .ok_or_else(|| CoinInfoError::ExtendedDenomRequired {
            denom: params.evm_denom.clone(),
            exponent: evm_exp,
        })
}

fn find_metadata(params: &VmParams, metadata: &dyn MetadataProvider) -> Result<DenomMetadata> {
    let candidates = params.candidate_denoms();
    candidates
        .iter()
        .find_map(|denom| {
            let found = metadata.denom_metadata(denom);
            if found.is_none() {
                debug!("No denom metadata under {}", denom);
            }
            found
        })
        .ok_or_else(|| CoinInfoError::MetadataNotFound {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        })
}
