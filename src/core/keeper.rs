//! Persistence of the resolved [`EvmCoinInfo`]

use super::coin_info::EvmCoinInfo;
use super::error::{CoinInfoError, Result};
use super::metadata::MetadataProvider;
use super::params::VmParams;
use super::resolver::{Resolver, ValidationPolicy};
use super::trace::{Attribute, Instrumentation, NoopInstrumentation};
use crate::store::KvStore;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};

/// Reserved store key of the coin info record.
pub const EVM_COIN_INFO_KEY: &[u8] = b"evm/coin_info";

/// Owns the durable copy of the coin info record.
pub struct CoinInfoKeeper<S: KvStore> {
    store: S,
    resolver: Resolver,
    default_coin_info: EvmCoinInfo,
    instrumentation: Arc<dyn Instrumentation>,
    validate_records: bool,
}

impl<S: KvStore> CoinInfoKeeper<S> {
    /// `default_coin_info` is returned by reads until a record is written.
    pub fn new(store: S, default_coin_info: EvmCoinInfo) -> Self {
        Self {
            store,
            resolver: Resolver::default(),
            default_coin_info,
            instrumentation: Arc::new(NoopInstrumentation),
            validate_records: false,
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.resolver = Resolver::new(policy);
        self
    }

    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn Instrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    /// Run [`EvmCoinInfo::validate`] on resolved records before
    /// `init_coin_info` stores them.
    pub fn with_record_validation(mut self) -> Self {
        self.validate_records = true;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a record has been written to the store.
    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.store.get(EVM_COIN_INFO_KEY)?.is_some())
    }

    /// Resolves the coin info from registry metadata without persisting it.
    pub fn load_coin_info(
        &self,
        params: &VmParams,
        metadata: &dyn MetadataProvider,
    ) -> Result<EvmCoinInfo> {
        self.traced(
            "LoadEvmCoinInfo",
            &[Attribute::string("evm_denom", &params.evm_denom)],
            || self.resolver.resolve(params, metadata),
        )
    }

    /// Resolves the coin info and stores it. Nothing is written on failure.
    pub fn init_coin_info(&self, params: &VmParams, metadata: &dyn MetadataProvider) -> Result<()> {
        self.traced("InitEvmCoinInfo", &[], || {
            let coin_info = self.load_coin_info(params, metadata)?;
            if self.validate_records {
                coin_info.validate()?;
            }
            self.set_coin_info(&coin_info)?;
            info!(
                denom = %coin_info.denom,
                decimals = coin_info.decimals,
                "Initialized evm coin info"
            );
            Ok(())
        })
    }

    /// Returns the stored coin info, or the default when none was written.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be read or holds bytes that do not decode
    /// into a record. Both mean the store was corrupted outside this keeper.
    pub fn coin_info(&self) -> EvmCoinInfo {
        self.try_coin_info()
            .unwrap_or_else(|e| panic!("failed to read evm coin info: {e}"))
    }

    /// Fallible form of [`Self::coin_info`].
    pub fn try_coin_info(&self) -> Result<EvmCoinInfo> {
        self.traced("GetEvmCoinInfo", &[], || {
            match self.store.get(EVM_COIN_INFO_KEY)? {
                None => {
                    debug!("No stored evm coin info, using default");
                    Ok(self.default_coin_info.clone())
                }
                Some(bytes) => serde_json::from_slice(&bytes)
                    .map_err(|source| CoinInfoError::CorruptRecord { source }),
            }
        })
    }

    pub fn set_coin_info(&self, coin_info: &EvmCoinInfo) -> Result<()> {
        self.traced(
            "SetEvmCoinInfo",
            &[
                Attribute::string("denom", &coin_info.denom),
                Attribute::int("decimals", i64::from(coin_info.decimals)),
            ],
            || {
                let bytes = serde_json::to_vec(coin_info)?;
                self.store.set(EVM_COIN_INFO_KEY, &bytes)?;
                Ok(())
            },
        )
    }

    fn traced<T>(
        &self,
        name: &'static str,
        attributes: &[Attribute],
        operation: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let span = self.instrumentation.start_span(name, attributes);
        let result = operation();
        span.end(result.as_ref().err().map(|e| e as &(dyn Error + 'static)));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::{DenomMetadata, DenomUnit};
    use crate::core::trace::ActiveSpan;
    use crate::store::MemoryStore;
    use std::sync::Mutex;

    struct SingleEntryRegistry(DenomMetadata);

    impl MetadataProvider for SingleEntryRegistry {
        fn denom_metadata(&self, denom: &str) -> Option<DenomMetadata> {
            (self.0.base == denom).then(|| self.0.clone())
        }
    }

    fn atom_registry() -> SingleEntryRegistry {
        SingleEntryRegistry(DenomMetadata {
            description: "The native staking token".to_string(),
            denom_units: vec![
                DenomUnit {
                    denom: "aatom".to_string(),
                    exponent: 0,
                    aliases: vec![],
                },
                DenomUnit {
                    denom: "uatom".to_string(),
                    exponent: 6,
                    aliases: vec!["microatom".to_string()],
                },
                DenomUnit {
                    denom: "atom".to_string(),
                    exponent: 18,
                    aliases: vec![],
                },
            ],
            base: "aatom".to_string(),
            display: "atom".to_string(),
            name: "Atom".to_string(),
            symbol: "ATOM".to_string(),
        })
    }

    fn six_decimal_info() -> EvmCoinInfo {
        EvmCoinInfo {
            denom: "uatom".to_string(),
            extended_denom: "aatom".to_string(),
            display_denom: "atom".to_string(),
            decimals: 6,
        }
    }

    #[derive(Default)]
    struct RecordingInstrumentation {
        events: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingSpan {
        name: &'static str,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Instrumentation for RecordingInstrumentation {
        fn start_span(&self, name: &'static str, _attributes: &[Attribute]) -> Box<dyn ActiveSpan> {
            self.events.lock().unwrap().push(format!("start {name}"));
            Box::new(RecordingSpan {
                name,
                events: Arc::clone(&self.events),
            })
        }
    }

    impl ActiveSpan for RecordingSpan {
        fn end(self: Box<Self>, error: Option<&(dyn Error + 'static)>) {
            let outcome = if error.is_some() { "err" } else { "ok" };
            self.events
                .lock()
                .unwrap()
                .push(format!("end {} {outcome}", self.name));
        }
    }

    #[test]
    fn test_get_on_empty_store_returns_default() {
        let default = six_decimal_info();
        let keeper = CoinInfoKeeper::new(MemoryStore::new(), default.clone());

        assert_eq!(keeper.coin_info(), default);
        assert!(!keeper.is_initialized().unwrap());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default());
        let info = six_decimal_info();

        keeper.set_coin_info(&info).unwrap();
        assert_eq!(keeper.coin_info(), info);
        assert_eq!(keeper.try_coin_info().unwrap(), info);
    }

    #[test]
    fn test_init_persists_resolved_info() {
        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default());
        let params = VmParams::new("uatom").with_extended_denom("aatom");

        keeper.init_coin_info(&params, &atom_registry()).unwrap();
        assert!(keeper.is_initialized().unwrap());
        assert_eq!(keeper.coin_info(), six_decimal_info());
    }

    #[test]
    fn test_init_failure_writes_nothing() {
        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default());
        let params = VmParams::new("ustake");

        let err = keeper
            .init_coin_info(&params, &atom_registry())
            .unwrap_err();
        assert!(matches!(err, CoinInfoError::MetadataNotFound { .. }));
        assert!(keeper.store().get(EVM_COIN_INFO_KEY).unwrap().is_none());
        assert_eq!(keeper.coin_info(), EvmCoinInfo::default());
    }

    #[test]
    fn test_init_with_strict_policy() {
        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default())
            .with_policy(ValidationPolicy::Strict);
        let params = VmParams::new("uatom").with_extended_denom("aatom");

        keeper.init_coin_info(&params, &atom_registry()).unwrap();
        assert_eq!(keeper.coin_info().decimals, 6);
    }

    #[test]
    fn test_record_validation_blocks_inconsistent_init() {
        // Strict resolution of a base denom yields 0 decimals
        let params = VmParams::new("aatom").with_extended_denom("aatom");

        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default())
            .with_policy(ValidationPolicy::Strict)
            .with_record_validation();
        let err = keeper.init_coin_info(&params, &atom_registry()).unwrap_err();
        assert!(matches!(err, CoinInfoError::InvalidCoinInfo(_)));
        assert!(!keeper.is_initialized().unwrap());

        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default())
            .with_policy(ValidationPolicy::Strict);
        keeper.init_coin_info(&params, &atom_registry()).unwrap();
        assert_eq!(keeper.coin_info().decimals, 0);
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let store = MemoryStore::new();
        store.set(EVM_COIN_INFO_KEY, b"not json").unwrap();
        let keeper = CoinInfoKeeper::new(&store, EvmCoinInfo::default());

        assert!(matches!(
            keeper.try_coin_info(),
            Err(CoinInfoError::CorruptRecord { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "failed to read evm coin info")]
    fn test_corrupt_record_panics_on_get() {
        let store = MemoryStore::new();
        store.set(EVM_COIN_INFO_KEY, b"{}").unwrap();
        let keeper = CoinInfoKeeper::new(&store, EvmCoinInfo::default());

        keeper.coin_info();
    }

    #[test]
    fn test_spans_are_reported() {
        let instrumentation = Arc::new(RecordingInstrumentation::default());
        let events = Arc::clone(&instrumentation.events);
        let keeper = CoinInfoKeeper::new(MemoryStore::new(), EvmCoinInfo::default())
            .with_instrumentation(instrumentation);

        let params = VmParams::new("uatom");
        assert!(keeper.init_coin_info(&params, &atom_registry()).is_err());

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "start InitEvmCoinInfo",
                "start LoadEvmCoinInfo",
                "end LoadEvmCoinInfo err",
                "end InitEvmCoinInfo err",
            ]
        );
    }
}
