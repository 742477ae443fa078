//! Field validation shared by new records and merged updates.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} cannot be both set and cleared")]
    SetAndCleared { field: &'static str },
}

/// Require a non-blank value of at most `max` characters.
///
/// # Errors
///
/// Returns an error if the value is blank or too long.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    optional_text(field, Some(value), max)
}

/// Limit an optional value to at most `max` characters.
///
/// # Errors
///
/// Returns an error if the value is too long.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

/// Reject negative amounts.
///
/// # Errors
///
/// Returns an error if the amount is below zero.
pub fn non_negative(field: &'static str, value: Option<Decimal>) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            Err(ValidationError::Negative { field })
        }
        _ => Ok(()),
    }
}
