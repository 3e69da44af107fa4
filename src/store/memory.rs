use super::{KvStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory store backed by a HashMap behind a RwLock
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {:?}", String::from_utf8_lossy(key));
        } else {
            debug!("Store MISS for key: {:?}", String::from_utf8_lossy(key));
        }
        Ok(value)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        debug!("Store SET for key: {:?}", String::from_utf8_lossy(key));
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
