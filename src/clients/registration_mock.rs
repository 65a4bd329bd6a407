#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::lookup::PassengerRecord;
use super::registration::{NewPassenger, RegistrationClient};
use crate::PassengerError;

#[derive(Clone, Default)]
pub struct MockRegistrationClient {
    pub registered: Arc<Mutex<Vec<PassengerRecord>>>,
}

impl MockRegistrationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PassengerRecord>) -> Self {
        Self {
            registered: Arc::new(Mutex::new(records)),
        }
    }
}

#[async_trait]
impl RegistrationClient for MockRegistrationClient {
    async fn count_by_email(&self, email: &str) -> Result<usize, PassengerError> {
        let registered = self.registered.lock().unwrap();
        Ok(registered.iter().filter(|r| r.email == email).count())
    }

    async fn register(
        &self,
        passenger: &NewPassenger,
        created_at: DateTime<Utc>,
    ) -> Result<PassengerRecord, PassengerError> {
        let mut registered = self.registered.lock().unwrap();

        let record = PassengerRecord {
            id: (registered.len() + 1).to_string(),
            username: passenger.username.clone(),
            email: passenger.email.clone(),
            password: passenger.password.clone(),
            created_at,
        };

        registered.push(record.clone());
        drop(registered);

        Ok(record)
    }
}
