// ── Core error types ──
//
// Construction-time contract violations. Both kinds surface at the
// offending call and are never recovered internally: a failed setter
// leaves the builder untouched, a failed `build()` returns nothing.

use thiserror::Error;

/// Error raised while assembling a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A setter received a value outside its domain (negative numbers).
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The requested operation is not allowed for the current builder state.
    #[error("illegal state: {reason}")]
    IllegalState { reason: String },
}

impl CoreError {
    pub(crate) fn negative(field: &'static str, description: &str) -> Self {
        Self::InvalidArgument {
            field,
            reason: format!("{description} cannot be set to negative value"),
        }
    }

    pub(crate) fn illegal_state(reason: impl Into<String>) -> Self {
        Self::IllegalState {
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState { .. })
    }
}

/// Validate a signed millisecond count, returning it as unsigned.
pub(crate) fn non_negative(
    value: i64,
    field: &'static str,
    description: &str,
) -> Result<u64, CoreError> {
    u64::try_from(value).map_err(|_| CoreError::negative(field, description))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_are_rejected_with_field_name() {
        let err = non_negative(-1, "gps_wait_period", "Wait period").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid gps_wait_period: Wait period cannot be set to negative value"
        );
    }

    #[test]
    fn zero_is_accepted() {
        assert_eq!(non_negative(0, "x", "X").unwrap(), 0);
        assert_eq!(non_negative(i64::MAX, "x", "X").unwrap(), i64::MAX.unsigned_abs());
    }
}
