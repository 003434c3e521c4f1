use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

use serde::{de::DeserializeOwned, Serialize};

use crate::CoreError;

/// Snapshot key holding the rental ledger.
pub const RENTAL_RECORDS_KEY: &str = "carRentalRecords";
/// Snapshot key holding the oil-change history.
pub const OIL_RECORDS_KEY: &str = "oilChangeRecords";
/// Snapshot key holding the per-vehicle odometer readings.
pub const CURRENT_MILEAGE_KEY: &str = "currentMileage";

/// Abstraction over key-value backends that hold whole-collection snapshots.
///
/// Every write replaces the value stored under `key` in full.
pub trait SnapshotStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn write(&self, key: &str, data: &str) -> Result<(), CoreError>;
    fn keys(&self) -> Result<Vec<String>, CoreError>;
}

/// Reads and decodes the snapshot under `key`, falling back to `T::default()` when absent.
pub fn load_snapshot<T>(store: &dyn SnapshotStore, key: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    match store.read(key)? {
        Some(data) => {
            tracing::debug!(key, bytes = data.len(), "decoding snapshot");
            serde_json::from_str(&data)
                .map_err(|err| CoreError::Serde(format!("snapshot `{key}` is corrupted: {err}")))
        }
        None => {
            tracing::debug!(key, "snapshot missing, starting empty");
            Ok(T::default())
        }
    }
}

/// Encodes `value` and replaces the snapshot under `key`.
pub fn save_snapshot<T>(store: &dyn SnapshotStore, key: &str, value: &T) -> Result<(), CoreError>
where
    T: Serialize + ?Sized,
{
    let data = serde_json::to_string(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    store.write(key, &data)?;
    tracing::debug!(key, bytes = data.len(), "snapshot written");
    Ok(())
}

/// In-process snapshot store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, data: impl Into<String>) -> Self {
        self.entries
            .write()
            .expect("MemoryStore lock poisoned")
            .insert(key.to_string(), data.into());
        self
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("MemoryStore lock poisoned")
            .get(key)
            .cloned()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, data: &str) -> Result<(), CoreError> {
        self.entries
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?
            .insert(key.to_string(), data.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self
            .entries
            .read()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?
            .keys()
            .cloned()
            .collect())
    }
}
