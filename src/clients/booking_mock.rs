#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::booking::{BookingRecord, BookingStore};
use crate::PassengerError;

#[derive(Clone, Default)]
pub struct MockBookingStore {
    pub bookings: Arc<Mutex<Vec<(String, BookingRecord)>>>,
    pub fail_with: Arc<Mutex<Option<PassengerError>>>,
}

impl MockBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_with(&self, error: PassengerError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl BookingStore for MockBookingStore {
    async fn put_booking(
        &self,
        user_id: &str,
        booking: &BookingRecord,
    ) -> Result<(), PassengerError> {
        if let Some(error) = self.fail_with.lock().unwrap().take() {
            return Err(error);
        }

        let mut bookings = self.bookings.lock().unwrap();
        // PUT semantics: same booking id overwrites
        bookings.retain(|(uid, b)| !(uid == user_id && b.booking_id == booking.booking_id));
        bookings.push((user_id.to_owned(), booking.clone()));
        drop(bookings);

        Ok(())
    }
}
