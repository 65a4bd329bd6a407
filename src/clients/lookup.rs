use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PassengerError, SecretString};

/// Raw passenger record as stored by the remote user API.
///
/// The mock API keeps the password on the record; it never leaves this
/// type except through [`SecretString`], and serializing a record skips
/// the field entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: SecretString,
    pub created_at: DateTime<Utc>,
}

impl PassengerRecord {
    /// The session-facing view of this record, without the password.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
impl PassengerRecord {
    pub fn mock() -> Self {
        Self::mock_from_credentials("rider", "Secur3!pass")
    }

    pub fn mock_from_credentials(username: &str, password: &str) -> Self {
        PassengerRecord {
            id: "1".to_owned(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password: SecretString::new(password),
            created_at: Utc::now(),
        }
    }
}

/// What the app holds in session state while authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Remote user lookup.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Finds the passenger record for a username, if one exists.
    ///
    /// Transport failures and non-success HTTP statuses surface as
    /// [`PassengerError::Network`]; the login flow treats those the same
    /// as bad credentials for throttling purposes.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PassengerRecord>, PassengerError>;
}
