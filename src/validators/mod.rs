//! Form field validation.
//!
//! Each screen validates its fields before any flow runs, so an invalid
//! form never consumes login attempt budget or reaches the network. Errors
//! carry the [`Field`] they belong to, letting the embedding UI render
//! them inline.

mod email;
mod fare;
mod password;
mod username;

pub use email::validate_email;
pub use fare::{validate_fare, Fare};
pub use password::{validate_login_password, validate_signup_password};
pub use username::validate_username;

/// The form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Fare,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    UsernameRequired,
    UsernameTooShort(usize),
    EmailRequired,
    EmailInvalidFormat,
    PasswordRequired,
    PasswordTooShort(usize),
    PasswordMissingComplexity,
    ConfirmPasswordMismatch,
    FareRequired,
    FareNotANumber,
    FareNotPositive,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::UsernameRequired | ValidationError::UsernameTooShort(_) => {
                Field::Username
            }
            ValidationError::EmailRequired | ValidationError::EmailInvalidFormat => Field::Email,
            ValidationError::PasswordRequired
            | ValidationError::PasswordTooShort(_)
            | ValidationError::PasswordMissingComplexity => Field::Password,
            ValidationError::ConfirmPasswordMismatch => Field::ConfirmPassword,
            ValidationError::FareRequired
            | ValidationError::FareNotANumber
            | ValidationError::FareNotPositive => Field::Fare,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UsernameRequired => write!(f, "Username is required"),
            ValidationError::UsernameTooShort(min) => {
                write!(f, "Username must be at least {min} characters")
            }
            ValidationError::EmailRequired => write!(f, "Email is required"),
            ValidationError::EmailInvalidFormat => write!(f, "Invalid email format"),
            ValidationError::PasswordRequired => write!(f, "Password is required"),
            ValidationError::PasswordTooShort(min) => {
                write!(f, "Password must be at least {min} characters")
            }
            ValidationError::PasswordMissingComplexity => {
                write!(f, "Password must contain uppercase, number, and special character")
            }
            ValidationError::ConfirmPasswordMismatch => write!(f, "Passwords do not match"),
            ValidationError::FareRequired => write!(f, "Please enter a fare amount"),
            ValidationError::FareNotANumber => write!(f, "Fare must be a number"),
            ValidationError::FareNotPositive => write!(f, "Fare must be greater than zero"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Strips the markup-significant characters (`<`, `>`, `&`, `"`) from a
/// form field before any other check runs.
pub fn sanitize_input(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '"'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_markup_characters() {
        assert_eq!(sanitize_input("ali<script>"), "aliscript");
        assert_eq!(sanitize_input("a&b\"c>d<e"), "abcde");
        assert_eq!(sanitize_input("plain_user.99"), "plain_user.99");
    }

    #[test]
    fn test_error_field_mapping() {
        assert_eq!(ValidationError::UsernameRequired.field(), Field::Username);
        assert_eq!(ValidationError::EmailInvalidFormat.field(), Field::Email);
        assert_eq!(ValidationError::PasswordTooShort(8).field(), Field::Password);
        assert_eq!(
            ValidationError::ConfirmPasswordMismatch.field(),
            Field::ConfirmPassword
        );
        assert_eq!(ValidationError::FareNotPositive.field(), Field::Fare);
    }
}
