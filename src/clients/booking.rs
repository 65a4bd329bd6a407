use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PassengerError;

/// How the ride will be paid for.
///
/// `Pending` is what a booking falls back to when an Ethereum transfer was
/// requested but no transaction hash materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
    Cash,
    Ethereum,
    Pending,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Cash => "cash",
            Self::Ethereum => "ethereum",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking as written to the remote store, field names matching the
/// deployed wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    /// Fare amount as the rider entered it.
    pub fare: String,
    pub payment_method: PaymentMethod,
    pub transaction_hash: Option<String>,
    /// Who takes the ride: the rider themselves or a chosen contact.
    pub passenger: String,
    #[serde(rename = "requestedAt")]
    pub requested_at: DateTime<Utc>,
}

/// Remote booking persistence.
///
/// Acceptance is judged on status alone; the store does not validate the
/// record server-side beyond that.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn put_booking(
        &self,
        user_id: &str,
        booking: &BookingRecord,
    ) -> Result<(), PassengerError>;
}
