//! Guards for required arguments.

use crate::error::GeographyError;

/// Unwraps a required argument, failing with [`GeographyError::ArgumentNull`] if it is missing.
pub fn not_null<T>(value: Option<T>, name: &'static str) -> Result<T, GeographyError> {
    value.ok_or(GeographyError::ArgumentNull { name })
}
