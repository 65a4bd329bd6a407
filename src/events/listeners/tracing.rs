use async_trait::async_trait;

use crate::events::{Listener, PassengerEvent};

/// Emits passenger events as tracing events.
///
/// Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &PassengerEvent) {
        tracing::info!(
            target: "curbside::events",
            event_name = event.name(),
            ?event,
            "passenger event"
        );
    }
}
