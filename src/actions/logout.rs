use chrono::Utc;

use crate::events::{dispatch, PassengerEvent};
use crate::session::AuthFlow;
use crate::throttle::LoginThrottle;
use crate::PassengerError;

/// Ends the session: the auth flow returns to idle and the attempt
/// counter is zeroed, matching what a fresh device starts with.
pub struct LogoutAction {
    throttle: LoginThrottle,
}

impl LogoutAction {
    pub fn new(throttle: LoginThrottle) -> Self {
        Self { throttle }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "logout", skip_all, err))]
    pub async fn execute(&self, flow: &mut AuthFlow) -> Result<(), PassengerError> {
        self.throttle.record_success().await?;
        flow.reset();

        log::info!(target: "curbside::auth", "msg=\"logged out\"");
        dispatch(PassengerEvent::LoggedOut { at: Utc::now() }).await;

        Ok(())
    }
}
