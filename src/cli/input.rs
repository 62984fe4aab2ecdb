//! Line-oriented input parsing for the interactive prompt

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Errors at the input boundary
#[derive(Debug, Error)]
pub enum InputError {
    /// Entry is not a number or outside the field's domain
    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),
    /// Too many invalid entries for one field
    #[error("Too many invalid entries for {0}")]
    RetriesExhausted(String),
    /// Input stream closed
    #[error("End of input")]
    EndOfInput,
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Strip digit-group separators a user may type (`1,000`, `1_000`)
fn clean(raw: &str) -> String {
    raw.trim().replace([',', '_'], "")
}

/// Positive whole number
pub fn parse_count(raw: &str) -> Result<u64, InputError> {
    let cleaned = clean(raw);
    let value = u64::from_str(&cleaned)
        .map_err(|_| InputError::InvalidNumericInput(format!("'{}' is not a whole number", raw.trim())))?;
    if value == 0 {
        return Err(InputError::InvalidNumericInput("must be greater than zero".to_string()));
    }
    Ok(value)
}

/// Positive decimal, plain or scientific notation
pub fn parse_positive_decimal(raw: &str) -> Result<Decimal, InputError> {
    let cleaned = clean(raw);
    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| InputError::InvalidNumericInput(format!("'{}' is not a number", raw.trim())))?;
    if value <= Decimal::ZERO {
        return Err(InputError::InvalidNumericInput("must be greater than zero".to_string()));
    }
    Ok(value)
}

/// Whole number within `[min, max]`
pub fn parse_in_range(raw: &str, min: i64, max: i64) -> Result<i64, InputError> {
    let cleaned = clean(raw);
    let value = i64::from_str(&cleaned)
        .map_err(|_| InputError::InvalidNumericInput(format!("'{}' is not a whole number", raw.trim())))?;
    if !(min..=max).contains(&value) {
        return Err(InputError::InvalidNumericInput(format!(
            "must be between {min} and {max}"
        )));
    }
    Ok(value)
}

/// `y` or `yes`, any case
pub fn is_yes(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "y" | "yes")
}
