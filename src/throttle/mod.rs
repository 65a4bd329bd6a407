//! Login attempt throttling.
//!
//! The policy itself is pure ([`ThrottlePolicy`]); persistence sits behind
//! [`AttemptStore`] so the same logic runs against an in-memory record, a
//! device-local file, or whatever the embedding app provides.
//! [`LoginThrottle`] ties store, policy and clock together for the login
//! flow.

mod file_store;
mod gate;
mod policy;
mod record;
mod store;

pub use file_store::FileAttemptStore;
pub use gate::LoginThrottle;
pub use policy::{ThrottleDecision, ThrottlePolicy};
pub use record::AttemptRecord;
pub use store::{AttemptStore, InMemoryAttemptStore};
