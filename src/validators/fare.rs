use super::ValidationError;

/// A validated fare amount, in the app's display currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fare(f64);

impl Fare {
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Fare converted to ETH at the app's fixed rate (one millionth of the
    /// fare amount).
    pub fn as_eth(&self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Fare converted to wei for the wallet transfer.
    pub fn as_wei(&self) -> u128 {
        // eth * 1e18 collapses to fare * 1e12
        (self.0 * 1e12).round() as u128
    }
}

impl std::fmt::Display for Fare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn validate_fare(input: &str) -> Result<Fare, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::FareRequired);
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::FareNotANumber)?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::FareNotPositive);
    }

    Ok(Fare(amount))
}
