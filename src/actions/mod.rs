//! Passenger flows.
//!
//! Each action owns the orchestration a frontend would otherwise inline in
//! its UI handlers: validate, consult the throttle, call the remote
//! collaborator, record the outcome, emit events. Actions are generic over
//! the client traits so they run unchanged against mocks.

pub mod book_ride;
pub mod login;
pub mod logout;
pub mod signup;

pub use book_ride::{BookRideAction, BookingOutcome, RideDetails};
pub use login::{Credentials, LoginAction, LoginForm};
pub use logout::LogoutAction;
pub use signup::{SignupAction, SignupForm};
