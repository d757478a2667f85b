//! Amount type
//!
//! Domain primitive for credit values.
//! Amounts are validated at construction time, so a persisted credit can
//! never carry a zero, negative or over-precise value.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Maximum decimal places (cents)
const MAX_SCALE: u32 = 2;

/// Amount represents a validated monetary value.
///
/// # Invariants
/// - Value is always positive (> 0)
/// - Maximum 2 decimal places
/// - Fits a `NUMERIC(17, 2)` column
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use credit_application_system::domain::Amount;
///
/// let amount = Amount::new(Decimal::new(10000, 2)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(100, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("must be positive (got {0})")]
    NotPositive(Decimal),

    #[error("has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("exceeds maximum allowed value")]
    Overflow,

    #[error("invalid format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::NotPositive` if value <= 0
    /// - `AmountError::TooManyDecimals` if more than 2 significant decimal places
    /// - `AmountError::Overflow` if value does not fit the column
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }

        fit_money_column(value).map(Self)
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Largest value a `NUMERIC(17, 2)` column can hold
fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999_999, MAX_SCALE)
}

/// Check that a value is stored in a `NUMERIC(17, 2)` column without
/// rounding. Sign is not checked. Returns the normalized value.
pub fn fit_money_column(value: Decimal) -> Result<Decimal, AmountError> {
    // 100.50 and 100.5 are the same amount
    let value = value.normalize();
    if value.scale() > MAX_SCALE {
        return Err(AmountError::TooManyDecimals(value.scale()));
    }

    if value.abs() > max_amount() {
        return Err(AmountError::Overflow);
    }

    Ok(value)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| AmountError::ParseError(e.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(Decimal::new(100, 0));
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), Decimal::new(100, 0));
    }

    #[test]
    fn test_amount_zero_rejected() {
        let amount = Amount::new(Decimal::ZERO);
        assert!(matches!(amount, Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_amount_negative_rejected() {
        let amount = Amount::new(Decimal::new(-100, 0));
        assert!(matches!(amount, Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_amount_too_many_decimals() {
        // 0.123 has 3 decimal places
        let amount = Amount::new(Decimal::new(123, 3));
        assert!(matches!(amount, Err(AmountError::TooManyDecimals(3))));
    }

    #[test]
    fn test_amount_trailing_zeros_are_ignored() {
        // 100.000 normalizes to 100
        let amount = Amount::new(Decimal::new(100000, 3)).unwrap();
        assert_eq!(amount.value(), Decimal::new(100, 0));
    }

    #[test]
    fn test_amount_overflow() {
        let value = Decimal::from_str("1000000000000000").unwrap();
        assert!(matches!(Amount::new(value), Err(AmountError::Overflow)));
    }

    #[test]
    fn test_amount_max_value_ok() {
        let value = Decimal::from_str("999999999999999.99").unwrap();
        assert!(Amount::new(value).is_ok());
    }

    #[test]
    fn test_fit_money_column_allows_zero() {
        assert_eq!(fit_money_column(Decimal::ZERO), Ok(Decimal::ZERO));
        assert_eq!(
            fit_money_column(Decimal::new(100050, 2)),
            Ok(Decimal::new(10005, 1))
        );
    }

    #[test]
    fn test_fit_money_column_rejects_rounding_and_overflow() {
        assert_eq!(
            fit_money_column(Decimal::new(1000555, 3)),
            Err(AmountError::TooManyDecimals(3))
        );
        let too_big = Decimal::from_str("10000000000000000").unwrap();
        assert_eq!(fit_money_column(too_big), Err(AmountError::Overflow));
    }

    #[test]
    fn test_amount_from_str() {
        let amount: Amount = "123.45".parse().unwrap();
        assert_eq!(amount.value(), Decimal::new(12345, 2));
        assert_eq!(amount.to_string(), "123.45");
    }

    #[test]
    fn test_amount_from_str_invalid() {
        let amount: Result<Amount, _> = "abc".parse();
        assert!(matches!(amount, Err(AmountError::ParseError(_))));
    }
}
