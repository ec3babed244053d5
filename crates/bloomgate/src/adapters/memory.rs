//! In-memory record log for tests and embedded use.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::RecordStoreError;
use crate::ports::RecordStore;

/// Volatile [`RecordStore`] holding records in a `Vec` behind a lock.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<String>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with records.
    pub fn with_records(records: Vec<String>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn read_all(&self) -> Result<Vec<String>, RecordStoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn append_one(&self, identifier: &str) -> Result<(), RecordStoreError> {
        self.records.write().await.push(identifier.to_owned());
        Ok(())
    }

    async fn overwrite_all(&self, records: &[String]) -> Result<(), RecordStoreError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}
