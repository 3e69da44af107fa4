use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtendedDenomOptions {
    pub extended_denom: String,
}

/// Denomination settings of the EVM module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VmParams {
    pub evm_denom: String,
    /// Only set on chains whose EVM denom is not 18 decimals
    #[serde(default)]
    pub extended_denom_options: Option<ExtendedDenomOptions>,
}

impl VmParams {
    pub fn new(evm_denom: &str) -> Self {
        Self {
            evm_denom: evm_denom.to_string(),
            extended_denom_options: None,
        }
    }

    pub fn with_extended_denom(mut self, extended_denom: &str) -> Self {
        self.extended_denom_options = Some(ExtendedDenomOptions {
            extended_denom: extended_denom.to_string(),
        });
        self
    }

    /// Configured extended denom. Blank values count as unset.
    pub fn extended_denom(&self) -> Option<&str> {
        self.extended_denom_options
            .as_ref()
            .map(|opts| opts.extended_denom.trim())
            .filter(|denom| !denom.is_empty())
    }

    /// Names the registry entry may be indexed under, in lookup order.
    pub fn candidate_denoms(&self) -> Vec<&str> {
        std::iter::once(self.evm_denom.as_str())
            .chain(self.extended_denom())
            .collect()
    }
}
