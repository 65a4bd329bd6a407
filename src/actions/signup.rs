use chrono::Utc;

use crate::clients::{NewPassenger, RegistrationClient, UserProfile};
use crate::events::{dispatch, PassengerEvent};
use crate::validators::{
    sanitize_input, validate_email, validate_signup_password, validate_username, ValidationError,
};
use crate::{PassengerError, SecretString};

/// Raw signup form input.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validates every field and produces the registration payload.
    ///
    /// Errors carry the field they belong to; the first failing field
    /// wins, checked in form order. The confirm-password value never
    /// leaves this method.
    pub fn validate(&self) -> Result<NewPassenger, ValidationError> {
        let username = sanitize_input(self.username.trim());
        validate_username(&username)?;

        let email = sanitize_input(self.email.trim());
        validate_email(&email)?;

        let password = SecretString::new(&self.password);
        validate_signup_password(&password)?;

        if self.password != self.confirm_password {
            return Err(ValidationError::ConfirmPasswordMismatch);
        }

        Ok(NewPassenger {
            username,
            email,
            password,
        })
    }
}

/// Registers a new passenger account.
///
/// The email uniqueness check happens against live data immediately before
/// the write; any existing record under the same address rejects the
/// signup.
pub struct SignupAction<R: RegistrationClient> {
    registration: R,
}

impl<R: RegistrationClient> SignupAction<R> {
    pub fn new(registration: R) -> Self {
        Self { registration }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signup", skip_all, err))]
    pub async fn execute(&self, passenger: &NewPassenger) -> Result<UserProfile, PassengerError> {
        if self.registration.count_by_email(&passenger.email).await? >= 1 {
            log::warn!(
                target: "curbside::auth",
                "msg=\"signup rejected, email taken\" email={}",
                passenger.email
            );
            return Err(PassengerError::EmailAlreadyRegistered);
        }

        let record = self.registration.register(passenger, Utc::now()).await?;

        log::info!(
            target: "curbside::auth",
            "msg=\"signup completed\" username={}",
            record.username
        );
        dispatch(PassengerEvent::SignupCompleted {
            username: record.username.clone(),
            email: record.email.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(record.profile())
    }
}
