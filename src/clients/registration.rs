use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::lookup::PassengerRecord;
use crate::{PassengerError, SecretString};

/// Signup details after form validation. The confirm-password field stops
/// at the form; it is never part of the payload.
#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Remote account creation.
#[async_trait]
pub trait RegistrationClient: Send + Sync {
    /// Number of existing records registered under `email`.
    ///
    /// Any count above zero means the email is taken.
    async fn count_by_email(&self, email: &str) -> Result<usize, PassengerError>;

    /// Creates the account and returns the stored record.
    async fn register(
        &self,
        passenger: &NewPassenger,
        created_at: DateTime<Utc>,
    ) -> Result<PassengerRecord, PassengerError>;
}
