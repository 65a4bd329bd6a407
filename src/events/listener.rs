use async_trait::async_trait;

use super::PassengerEvent;

/// Trait for handling passenger events asynchronously.
///
/// Implement this to create custom listeners — analytics, alerting,
/// badge counters. Filter by matching on the event variant.
///
/// # Example
///
/// ```rust,ignore
/// use curbside::events::{Listener, PassengerEvent};
/// use async_trait::async_trait;
///
/// struct LockoutAlert;
///
/// #[async_trait]
/// impl Listener for LockoutAlert {
///     async fn handle(&self, event: &PassengerEvent) {
///         if let PassengerEvent::LoginLockedOut { remaining_minutes, .. } = event {
///             // notify support tooling
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Called for every dispatched event.
    async fn handle(&self, event: &PassengerEvent);
}
