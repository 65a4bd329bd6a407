use async_trait::async_trait;

use crate::events::{Listener, PassengerEvent};

/// Logs all passenger events using the `log` crate.
///
/// # Example
///
/// ```rust,ignore
/// use curbside::register_event_listeners;
/// use curbside::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &PassengerEvent) {
        log::log!(
            target: "curbside::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}
