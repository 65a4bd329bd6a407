use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use super::network_error;
use crate::clients::{LookupClient, NewPassenger, PassengerRecord, RegistrationClient};
use crate::PassengerError;

/// Client for the hosted user store.
///
/// The store is a generated REST API with a single `/signup` resource.
/// Filtering happens through query parameters; a filter with no matches
/// answers `404 Not Found` rather than an empty array, so 404 reads as
/// "no records" here, never as an error.
#[derive(Debug, Clone)]
pub struct UserApiClient {
    client: reqwest::Client,
    base_url: String,
}

/// POST payload for account creation. A dedicated type because
/// [`PassengerRecord`] never serializes its password, while registration
/// must send one.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupPayload<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    created_at: DateTime<Utc>,
}

impl UserApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn signup_url(&self) -> String {
        format!("{}/signup", self.base_url)
    }

    /// Runs a filtered listing of the `/signup` resource.
    async fn filter(&self, key: &str, value: &str) -> Result<Vec<PassengerRecord>, PassengerError> {
        let response = self
            .client
            .get(self.signup_url())
            .query(&[(key, value)])
            .send()
            .await
            .map_err(network_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let response = response.error_for_status().map_err(network_error)?;
        response.json().await.map_err(network_error)
    }
}

#[async_trait]
impl LookupClient for UserApiClient {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(username = %username)))]
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PassengerRecord>, PassengerError> {
        let records = self.filter("username", username).await?;

        // the API filters by substring; only an exact match authenticates
        Ok(records.into_iter().find(|r| r.username == username))
    }
}

#[async_trait]
impl RegistrationClient for UserApiClient {
    async fn count_by_email(&self, email: &str) -> Result<usize, PassengerError> {
        let records = self.filter("email", email).await?;
        Ok(records.iter().filter(|r| r.email == email).count())
    }

    async fn register(
        &self,
        passenger: &NewPassenger,
        created_at: DateTime<Utc>,
    ) -> Result<PassengerRecord, PassengerError> {
        let payload = SignupPayload {
            username: &passenger.username,
            email: &passenger.email,
            password: passenger.password.expose_secret(),
            created_at,
        };

        let response = self
            .client
            .post(self.signup_url())
            .json(&payload)
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?;

        response.json().await.map_err(network_error)
    }
}
