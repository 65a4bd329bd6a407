#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::lookup::{LookupClient, PassengerRecord};
use crate::PassengerError;

/// In-memory lookup backed by a vector of records.
///
/// `calls` counts every lookup, which lets tests assert that a locked-out
/// login never reaches the network. Push an error into `fail_with` to
/// simulate an unreachable service.
#[derive(Clone, Default)]
pub struct MockLookupClient {
    pub records: Arc<Mutex<Vec<PassengerRecord>>>,
    pub fail_with: Arc<Mutex<Option<PassengerError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockLookupClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PassengerRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_next_with(&self, error: PassengerError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl LookupClient for MockLookupClient {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PassengerRecord>, PassengerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.fail_with.lock().unwrap().take() {
            return Err(error);
        }

        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.username == username).cloned())
    }
}
