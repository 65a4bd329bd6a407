//! Domain events.
//!
//! Actions fire events; the embedding app decides what to do with them by
//! registering listeners at startup. With no listeners registered,
//! dispatch is a no-op.

mod event;
mod listener;
pub mod listeners;
mod registry;

pub use event::PassengerEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventRegistry};
