use super::ValidationError;

const MIN_USERNAME_LEN: usize = 3;

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameRequired);
    }

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort(MIN_USERNAME_LEN));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("ali").is_ok());
        assert!(validate_username("passenger_42").is_ok());
    }

    #[test]
    fn test_blank_username() {
        assert_eq!(
            validate_username("").unwrap_err(),
            ValidationError::UsernameRequired
        );
        assert_eq!(
            validate_username("   ").unwrap_err(),
            ValidationError::UsernameRequired
        );
    }

    #[test]
    fn test_short_username() {
        assert_eq!(
            validate_username("ab").unwrap_err(),
            ValidationError::UsernameTooShort(3)
        );
    }
}
