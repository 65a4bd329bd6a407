use std::sync::RwLock;

use async_trait::async_trait;

use super::record::AttemptRecord;
use crate::PassengerError;

/// Persistence for the device's [`AttemptRecord`].
///
/// Implement this to back the throttle with whatever key-value storage the
/// platform offers. Access is read-modify-write with no atomicity
/// guarantee: two concurrent frontends sharing a store can under- or
/// over-count attempts. That is accepted for single-device, low-stakes
/// rate limiting.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Loads the record, or a clear one if nothing is stored yet.
    async fn load(&self) -> Result<AttemptRecord, PassengerError>;

    async fn save(&self, record: &AttemptRecord) -> Result<(), PassengerError>;

    /// Removes any stored record.
    async fn clear(&self) -> Result<(), PassengerError>;
}

/// Volatile store, for tests and frontends without persistence.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    record: RwLock<AttemptRecord>,
}

impl InMemoryAttemptStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(record: AttemptRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn load(&self) -> Result<AttemptRecord, PassengerError> {
        let record = self
            .record
            .read()
            .map_err(|_| PassengerError::Storage("Failed to acquire lock".to_owned()))?;
        Ok(record.clone())
    }

    async fn save(&self, record: &AttemptRecord) -> Result<(), PassengerError> {
        let mut stored = self
            .record
            .write()
            .map_err(|_| PassengerError::Storage("Failed to acquire lock".to_owned()))?;
        *stored = record.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), PassengerError> {
        self.save(&AttemptRecord::new()).await
    }
}
