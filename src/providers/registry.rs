use crate::core::metadata::{DenomMetadata, MetadataProvider};
use anyhow::{Result, bail};
use std::collections::HashMap;
use tracing::debug;

/// In-memory metadata registry indexed by each entry's base denom.
#[derive(Debug, Clone, Default)]
pub struct DenomRegistry {
    entries: HashMap<String, DenomMetadata>,
}

impl DenomRegistry {
    pub fn new(metadata: Vec<DenomMetadata>) -> Result<Self> {
        let mut entries = HashMap::with_capacity(metadata.len());
        for entry in metadata {
            if entries.contains_key(&entry.base) {
                bail!("Duplicate denom metadata for base {}", entry.base);
            }
            entries.insert(entry.base.clone(), entry);
        }
        debug!("Loaded {} denom metadata entries", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataProvider for DenomRegistry {
    fn denom_metadata(&self, denom: &str) -> Option<DenomMetadata> {
        self.entries.get(denom).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::DenomUnit;

    fn entry(base: &str, display: &str) -> DenomMetadata {
        DenomMetadata {
            description: String::new(),
            denom_units: vec![
                DenomUnit {
                    denom: base.to_string(),
                    exponent: 0,
                    aliases: vec![],
                },
                DenomUnit {
                    denom: display.to_string(),
                    exponent: 18,
                    aliases: vec![],
                },
            ],
            base: base.to_string(),
            display: display.to_string(),
            name: String::new(),
            symbol: String::new(),
        }
    }

    #[test]
    fn test_lookup_by_base() {
        let registry =
            DenomRegistry::new(vec![entry("aatom", "atom"), entry("astake", "stake")]).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.denom_metadata("astake").map(|m| m.display),
            Some("stake".to_string())
        );
        // Only the base denom is indexed
        assert!(registry.denom_metadata("atom").is_none());
    }

    #[test]
    fn test_duplicate_base_is_rejected() {
        let result = DenomRegistry::new(vec![entry("aatom", "atom"), entry("aatom", "atom2")]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }
}
