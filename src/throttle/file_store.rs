//! File-backed attempt store.
//!
//! Persists the record as a small JSON document with the deployed
//! device-storage keys: `loginAttempts` as a string integer and
//! `lastAttemptTime` as string epoch milliseconds. Unparseable content
//! degrades to a clear record rather than failing the login flow.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::record::AttemptRecord;
use super::store::AttemptStore;
use crate::PassengerError;

#[derive(Debug, Serialize, Deserialize)]
struct StoredAttempts {
    #[serde(rename = "loginAttempts")]
    login_attempts: String,
    #[serde(rename = "lastAttemptTime", skip_serializing_if = "Option::is_none")]
    last_attempt_time: Option<String>,
}

impl From<&AttemptRecord> for StoredAttempts {
    fn from(record: &AttemptRecord) -> Self {
        Self {
            login_attempts: record.count.to_string(),
            last_attempt_time: record
                .last_attempt_at
                .map(|at| at.timestamp_millis().to_string()),
        }
    }
}

impl StoredAttempts {
    fn into_record(self) -> AttemptRecord {
        AttemptRecord {
            count: self.login_attempts.parse().unwrap_or(0),
            last_attempt_at: self
                .last_attempt_time
                .and_then(|ms| ms.parse::<i64>().ok())
                .and_then(DateTime::from_timestamp_millis),
        }
    }
}

/// Attempt store persisted as a JSON file on the device.
pub struct FileAttemptStore {
    path: PathBuf,
}

impl FileAttemptStore {
    /// Creates a store at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, PassengerError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PassengerError::Storage(format!("Failed to create attempt store directory: {e}"))
            })?;
        }
        Ok(Self { path })
    }
}

#[async_trait]
impl AttemptStore for FileAttemptStore {
    async fn load(&self) -> Result<AttemptRecord, PassengerError> {
        if !self.path.exists() {
            return Ok(AttemptRecord::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PassengerError::Storage(format!("Failed to read attempt file: {e}")))?;

        // corrupted content means no usable history
        Ok(serde_json::from_str::<StoredAttempts>(&content)
            .map(StoredAttempts::into_record)
            .unwrap_or_default())
    }

    async fn save(&self, record: &AttemptRecord) -> Result<(), PassengerError> {
        let stored = StoredAttempts::from(record);
        let content = serde_json::to_string(&stored)
            .map_err(|e| PassengerError::Storage(format!("Failed to serialize attempts: {e}")))?;

        std::fs::write(&self.path, content)
            .map_err(|e| PassengerError::Storage(format!("Failed to write attempt file: {e}")))
    }

    async fn clear(&self) -> Result<(), PassengerError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                PassengerError::Storage(format!("Failed to remove attempt file: {e}"))
            })?;
        }
        Ok(())
    }
}
