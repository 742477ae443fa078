//! Partial-update merging.
//!
//! A patch only overwrites the fields it carries a value for. Absent and `null`
//! are the same thing on the way in, so nullable fields are emptied through an
//! explicit clear list instead.

use crate::validation::ValidationError;

/// Overwrite `slot` when a value was supplied.
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Overwrite or clear a nullable `slot`.
///
/// # Errors
///
/// Returns an error when the field is both supplied and listed for clearing.
pub(crate) fn merge_nullable<T>(
    field: &'static str,
    slot: &mut Option<T>,
    value: Option<T>,
    clear: bool,
) -> Result<(), ValidationError> {
    match (value, clear) {
        (Some(_), true) => return Err(ValidationError::SetAndCleared { field }),
        (Some(value), false) => *slot = Some(value),
        (None, true) => *slot = None,
        (None, false) => {}
    }

    Ok(())
}
