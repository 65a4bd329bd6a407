use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::clients::{
    BookingRecord, BookingStore, PaymentMethod, TransferRequest, TxHash, WalletClient,
};
use crate::config::WalletConfig;
use crate::events::{dispatch, PassengerEvent};
use crate::validators::{validate_fare, Fare};
use crate::PassengerError;

/// What the rider filled in on the booking screen.
#[derive(Debug, Clone)]
pub struct RideDetails {
    /// Booking id to write under. Generated when absent, so retrying with
    /// the same id overwrites rather than duplicates.
    pub booking_id: Option<String>,
    /// Fare amount as entered.
    pub fare: String,
    /// Who takes the ride: "Myself" or a chosen contact's name.
    pub passenger: String,
    pub payment_method: PaymentMethod,
}

/// Result of a booking attempt that was persisted.
///
/// A booking can succeed while its payment did not: `wallet_error` is set
/// and the stored record carries `PaymentMethod::Pending` with no
/// transaction hash.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub record: BookingRecord,
    pub tx_hash: Option<TxHash>,
    pub wallet_error: Option<PassengerError>,
}

impl BookingOutcome {
    pub fn payment_settled(&self) -> bool {
        self.wallet_error.is_none()
    }
}

/// Books a ride, optionally paying the fare through the rider's wallet.
///
/// The wallet leg runs under the configured timeout and the caller's
/// cancellation token. Whatever happens to the payment, the booking write
/// still goes through; the record just degrades to a pending payment.
/// Only a failed booking write fails the action.
pub struct BookRideAction<B: BookingStore, W: WalletClient> {
    bookings: B,
    wallet: W,
    config: WalletConfig,
}

impl<B: BookingStore, W: WalletClient> BookRideAction<B, W> {
    pub fn new(bookings: B, wallet: W, config: WalletConfig) -> Self {
        Self {
            bookings,
            wallet,
            config,
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "book_ride", skip_all, err))]
    pub async fn execute(
        &self,
        user_id: &str,
        ride: &RideDetails,
        cancel: &CancellationToken,
    ) -> Result<BookingOutcome, PassengerError> {
        let fare = validate_fare(&ride.fare)
            .map_err(|e| PassengerError::InvalidBooking(e.to_string()))?;

        let (payment_method, tx_hash, wallet_error) = match ride.payment_method {
            PaymentMethod::Ethereum => match self.pay_fare(fare, cancel).await {
                Ok(hash) => {
                    log::info!(
                        target: "curbside::booking",
                        "msg=\"payment confirmed\" tx_hash={hash}"
                    );
                    dispatch(PassengerEvent::PaymentConfirmed {
                        tx_hash: hash.0.clone(),
                        at: Utc::now(),
                    })
                    .await;
                    (PaymentMethod::Ethereum, Some(hash), None)
                }
                Err(error) => {
                    log::warn!(
                        target: "curbside::booking",
                        "msg=\"payment failed, booking continues as pending\" reason=\"{error}\""
                    );
                    dispatch(PassengerEvent::PaymentFailed {
                        reason: error.to_string(),
                        at: Utc::now(),
                    })
                    .await;
                    (PaymentMethod::Pending, None, Some(error))
                }
            },
            method => (method, None, None),
        };

        let record = BookingRecord {
            booking_id: ride
                .booking_id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            fare: ride.fare.trim().to_owned(),
            payment_method,
            transaction_hash: tx_hash.as_ref().map(|h| h.0.clone()),
            passenger: ride.passenger.clone(),
            requested_at: Utc::now(),
        };

        self.bookings.put_booking(user_id, &record).await?;

        log::info!(
            target: "curbside::booking",
            "msg=\"ride booked\" booking_id={} payment_method={}",
            record.booking_id,
            record.payment_method
        );
        dispatch(PassengerEvent::RideBooked {
            booking_id: record.booking_id.clone(),
            payment_method: record.payment_method,
            at: Utc::now(),
        })
        .await;

        Ok(BookingOutcome {
            record,
            tx_hash,
            wallet_error,
        })
    }

    /// One plain transfer from the rider's first account to the configured
    /// recipient, bounded by the configured timeout and `cancel`.
    async fn pay_fare(
        &self,
        fare: Fare,
        cancel: &CancellationToken,
    ) -> Result<TxHash, PassengerError> {
        let accounts = self.wallet.accounts().await?;
        let from = accounts.first().ok_or(PassengerError::WalletUnavailable)?;

        let request = TransferRequest {
            from: from.clone(),
            to: self.config.recipient.clone(),
            value_wei: fare.as_wei(),
            gas: self.config.gas,
        };

        let timeout = self
            .config
            .request_timeout
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(60));

        tokio::select! {
            _ = cancel.cancelled() => Err(PassengerError::WalletCancelled),
            result = tokio::time::timeout(timeout, self.wallet.send_transfer(&request)) => {
                match result {
                    Ok(outcome) => outcome,
                    Err(_) => Err(PassengerError::WalletTimedOut),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{MockBookingStore, MockWalletClient};
    use std::time::Duration;

    fn action(
        bookings: MockBookingStore,
        wallet: MockWalletClient,
    ) -> BookRideAction<MockBookingStore, MockWalletClient> {
        BookRideAction::new(
            bookings,
            wallet,
            WalletConfig {
                recipient: "0xrecipient".to_owned(),
                ..WalletConfig::default()
            },
        )
    }

    fn ride(payment_method: PaymentMethod) -> RideDetails {
        RideDetails {
            booking_id: Some("bk-1".to_owned()),
            fare: "250".to_owned(),
            passenger: "Myself".to_owned(),
            payment_method,
        }
    }

    #[tokio::test]
    async fn test_cash_booking_skips_wallet() {
        let bookings = MockBookingStore::new();
        let wallet = MockWalletClient::new();
        let action = action(bookings.clone(), wallet.clone());

        let outcome = action
            .execute("u1", &ride(PaymentMethod::Cash), &CancellationToken::new())
            .await
            .unwrap();

        assert!(outcome.payment_settled());
        assert_eq!(outcome.record.payment_method, PaymentMethod::Cash);
        assert!(wallet.sent.lock().unwrap().is_empty());
        assert_eq!(bookings.bookings.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ethereum_booking_sends_transfer() {
        let bookings = MockBookingStore::new();
        let wallet = MockWalletClient::new();
        let action = action(bookings.clone(), wallet.clone());

        let outcome = action
            .execute(
                "u1",
                &ride(PaymentMethod::Ethereum),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(outcome.payment_settled());
        assert_eq!(outcome.record.payment_method, PaymentMethod::Ethereum);
        assert_eq!(outcome.record.transaction_hash, outcome.tx_hash.map(|h| h.0));

        let sent = wallet.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "0xmockaccount");
        assert_eq!(sent[0].to, "0xrecipient");
        // fare 250 at the fixed rate
        assert_eq!(sent[0].value_wei, 250_000_000_000_000);
        assert_eq!(sent[0].gas, 21_000);
    }

    #[tokio::test]
    async fn test_wallet_rejection_degrades_to_pending() {
        let bookings = MockBookingStore::new();
        let wallet = MockWalletClient::new();
        wallet.fail_next_with(PassengerError::WalletRejected("user denied".to_owned()));
        let action = action(bookings.clone(), wallet);

        let outcome = action
            .execute(
                "u1",
                &ride(PaymentMethod::Ethereum),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(!outcome.payment_settled());
        assert_eq!(outcome.record.payment_method, PaymentMethod::Pending);
        assert!(outcome.record.transaction_hash.is_none());
        assert!(matches!(
            outcome.wallet_error,
            Some(PassengerError::WalletRejected(_))
        ));
        // the booking still landed
        assert_eq!(bookings.bookings.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_wallet_account_degrades_to_pending() {
        let bookings = MockBookingStore::new();
        let action = action(bookings.clone(), MockWalletClient::disconnected());

        let outcome = action
            .execute(
                "u1",
                &ride(PaymentMethod::Ethereum),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.wallet_error, Some(PassengerError::WalletUnavailable));
        assert_eq!(outcome.record.payment_method, PaymentMethod::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_wallet_times_out() {
        let bookings = MockBookingStore::new();
        let wallet = MockWalletClient::new();
        wallet.respond_after(Duration::from_secs(120));
        let action = action(bookings.clone(), wallet);

        let outcome = action
            .execute(
                "u1",
                &ride(PaymentMethod::Ethereum),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.wallet_error, Some(PassengerError::WalletTimedOut));
        assert_eq!(outcome.record.payment_method, PaymentMethod::Pending);
        assert_eq!(bookings.bookings.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_wallet_request() {
        let bookings = MockBookingStore::new();
        let wallet = MockWalletClient::new();
        wallet.respond_after(Duration::from_secs(30));
        let action = action(bookings.clone(), wallet);

        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = action
            .execute("u1", &ride(PaymentMethod::Ethereum), &cancel)
            .await
            .unwrap();

        assert_eq!(outcome.wallet_error, Some(PassengerError::WalletCancelled));
        assert_eq!(outcome.record.payment_method, PaymentMethod::Pending);
    }

    #[tokio::test]
    async fn test_invalid_fare_rejects_before_any_side_effect() {
        let bookings = MockBookingStore::new();
        let wallet = MockWalletClient::new();
        let action = action(bookings.clone(), wallet.clone());

        let mut details = ride(PaymentMethod::Ethereum);
        details.fare = String::new();

        let error = action
            .execute("u1", &details, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, PassengerError::InvalidBooking(_)));
        assert!(wallet.sent.lock().unwrap().is_empty());
        assert!(bookings.bookings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_fails_the_booking() {
        let bookings = MockBookingStore::new();
        bookings.fail_next_with(PassengerError::Network("db unreachable".to_owned()));
        let action = action(bookings, MockWalletClient::new());

        let error = action
            .execute("u1", &ride(PaymentMethod::Cash), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, PassengerError::Network(_)));
    }

    #[tokio::test]
    async fn test_generated_booking_id_when_absent() {
        let bookings = MockBookingStore::new();
        let action = action(bookings.clone(), MockWalletClient::new());

        let mut details = ride(PaymentMethod::Cash);
        details.booking_id = None;

        let outcome = action
            .execute("u1", &details, &CancellationToken::new())
            .await
            .unwrap();
        assert!(!outcome.record.booking_id.is_empty());
    }
}
