use super::ValidationError;
use crate::SecretString;

const MIN_PASSWORD_LEN: usize = 8;

/// Login only checks presence and length; the stricter rules apply at
/// signup so existing accounts are never locked out of the login form.
pub fn validate_login_password(password: &SecretString) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }

    Ok(())
}

/// Signup requires an uppercase letter, a digit and one of `!@#$%^&*` on
/// top of the length rule.
pub fn validate_signup_password(password: &SecretString) -> Result<(), ValidationError> {
    validate_login_password(password)?;

    let raw = password.expose_secret();
    let has_uppercase = raw.chars().any(char::is_uppercase);
    let has_digit = raw.chars().any(|c| c.is_ascii_digit());
    let has_special = raw.chars().any(is_special_char);

    if !(has_uppercase && has_digit && has_special) {
        return Err(ValidationError::PasswordMissingComplexity);
    }

    Ok(())
}

fn is_special_char(c: char) -> bool {
    matches!(c, '!' | '@' | '#' | '$' | '%' | '^' | '&' | '*')
}
