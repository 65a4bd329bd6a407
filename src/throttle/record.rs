use chrono::{DateTime, Utc};

/// Failed login history for this device.
///
/// `count` is monotonically non-decreasing between resets; a reset is the
/// only operation that lowers it. The record is per-device, not
/// per-account: it lives wherever the embedding app persists it, so two
/// devices never share a counter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttemptRecord {
    pub count: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl AttemptRecord {
    /// A fresh record: zero failures, no timestamp.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_attempt_at = None;
    }

    pub fn is_clear(&self) -> bool {
        self.count == 0 && self.last_attempt_at.is_none()
    }
}
