use async_trait::async_trait;

use super::network_error;
use crate::clients::{BookingRecord, BookingStore};
use crate::PassengerError;

/// Booking persistence against a realtime-database REST endpoint.
///
/// Bookings live at `users/<user_id>/bookings/<booking_id>.json` and are
/// written with PUT, so retrying the same booking id replaces the node
/// instead of appending a duplicate.
#[derive(Debug, Clone)]
pub struct RtdbBookingStore {
    client: reqwest::Client,
    base_url: String,
}

impl RtdbBookingStore {
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

    fn booking_url(&self, user_id: &str, booking_id: &str) -> String {
        format!(
            "{}/users/{user_id}/bookings/{booking_id}.json",
            self.base_url
        )
    }
}

#[async_trait]
impl BookingStore for RtdbBookingStore {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(booking_id = %booking.booking_id))
    )]
    async fn put_booking(
        &self,
        user_id: &str,
        booking: &BookingRecord,
    ) -> Result<(), PassengerError> {
        self.client
            .put(self.booking_url(user_id, &booking.booking_id))
            .json(booking)
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?;

        Ok(())
    }
}
