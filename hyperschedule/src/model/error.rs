//! Maintainer error type.
//!
//! Every validating constructor and setter in the model fails with a
//! `MaintainerError`. These errors always point at a bug in the calling
//! scraper (bad input), never at a transient condition.

/// Error raised when a scraper hands the model an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaintainerError {
    /// A free-form string could not be parsed into the requested type
    #[error("{field} got invalid string: {value:?}")]
    Unparseable { field: &'static str, value: String },

    /// A value has the right type but is outside the allowed range
    #[error("{field} got invalid value {value}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Two companion values are not strictly increasing
    #[error("{field} must start before it ends: {start} is not before {end}")]
    OutOfOrder {
        field: &'static str,
        start: String,
        end: String,
    },

    /// A required field was never set
    #[error("{0} is required")]
    Missing(&'static str),

    /// A collection that must have members is empty
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Two values that must agree do not
    #[error("{field} mismatch: expected {expected:?}, got {actual:?}")]
    Mismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
}

impl MaintainerError {
    pub(crate) fn unparseable(field: &'static str, value: impl Into<String>) -> Self {
        Self::Unparseable {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn invalid(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn out_of_order(
        field: &'static str,
        start: impl ToString,
        end: impl ToString,
    ) -> Self {
        Self::OutOfOrder {
            field,
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}
