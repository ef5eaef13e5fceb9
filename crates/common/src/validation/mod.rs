//! Field-tagged validation rules
//!
//! Small composable checks used by write-side validators. Every failure is a
//! `CommonError::Validation` carrying the offending field name so callers
//! can surface it unchanged.

use crate::error::{CommonError, CommonResult};

/// Require a finite, non-negative number
pub fn require_non_negative(field: &str, value: f64) -> CommonResult<()> {
    if !value.is_finite() {
        return Err(CommonError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CommonError::validation(field, "must be >= 0"));
    }
    Ok(())
}

/// Require a fraction in `0..=1`
pub fn require_fraction(field: &str, value: f64) -> CommonResult<()> {
    require_non_negative(field, value)?;
    if value > 1.0 {
        return Err(CommonError::validation(field, "must be <= 1"));
    }
    Ok(())
}

/// Require a non-empty string (after trimming)
pub fn require_non_empty(field: &str, value: &str) -> CommonResult<()> {
    if value.trim().is_empty() {
        return Err(CommonError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Require a non-empty slice
pub fn require_non_empty_list<T>(field: &str, values: &[T]) -> CommonResult<()> {
    if values.is_empty() {
        return Err(CommonError::validation(field, "must contain at least one entry"));
    }
    Ok(())
}
