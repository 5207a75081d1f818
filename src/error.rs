//! Error types for misuse of the API and for dispatch faults.
//!
//! Validation failures are never errors in this crate: they are entries in a
//! [`ValidationResult`](crate::ValidationResult). The types here cover the two
//! other outcomes a caller can see:
//!
//! - [`UsageError`]: the caller broke a precondition (empty field name,
//!   missing validation target).
//! - [`DispatchError`]: an async dispatch did not produce a result because the
//!   custom strategy itself failed, timed out, or was cancelled.

use std::fmt;
use std::time::Duration;

/// Fault raised by a custom async strategy.
///
/// This is a defect in the check (a network error, a broken query), not a
/// finding about the data, so it is never turned into a validation error.
pub type StrategyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A precondition of the validation API was violated.
///
/// # Examples
///
/// ```rust
/// use sluice::{UsageError, ValidationResult};
///
/// let mut result = ValidationResult::new();
/// assert_eq!(result.try_add_error("  ", "msg").unwrap_err(), UsageError::EmptyField);
/// assert!(result.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// A field identifier was empty or whitespace.
    EmptyField,
    /// An error message was empty or whitespace.
    EmptyMessage,
    /// No value was supplied to validate.
    MissingValue,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::EmptyField => write!(f, "field name cannot be empty"),
            UsageError::EmptyMessage => write!(f, "error message cannot be empty"),
            UsageError::MissingValue => write!(f, "validation target cannot be absent"),
        }
    }
}

impl std::error::Error for UsageError {}

/// Async dispatch ended without a validation result.
///
/// # Examples
///
/// ```rust
/// use sluice::DispatchError;
/// use std::time::Duration;
///
/// let err = DispatchError::Timeout { duration: Duration::from_millis(50) };
/// assert_eq!(err.to_string(), "async strategy timed out after 50ms");
/// ```
#[derive(Debug)]
pub enum DispatchError {
    /// The registered async strategy returned a fault.
    Strategy(StrategyError),
    /// The strategy did not finish within the configured timeout.
    Timeout {
        /// The timeout that was exceeded.
        duration: Duration,
    },
    /// The cancellation signal fired before the strategy finished.
    Cancelled,
}

impl DispatchError {
    /// Returns `true` for [`DispatchError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, DispatchError::Timeout { .. })
    }

    /// Returns `true` for [`DispatchError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DispatchError::Cancelled)
    }

    /// The strategy fault, if this error carries one.
    pub fn strategy_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DispatchError::Strategy(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Strategy(err) => write!(f, "async strategy failed: {}", err),
            DispatchError::Timeout { duration } => {
                write!(f, "async strategy timed out after {:?}", duration)
            }
            DispatchError::Cancelled => write!(f, "validation was cancelled"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Strategy(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<StrategyError> for DispatchError {
    fn from(err: StrategyError) -> Self {
        DispatchError::Strategy(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug)]
    struct Unreachable;

    impl fmt::Display for Unreachable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "host unreachable")
        }
    }

    impl Error for Unreachable {}

    #[test]
    fn test_usage_error_display() {
        assert_eq!(UsageError::EmptyField.to_string(), "field name cannot be empty");
        assert_eq!(
            UsageError::EmptyMessage.to_string(),
            "error message cannot be empty"
        );
        assert_eq!(
            UsageError::MissingValue.to_string(),
            "validation target cannot be absent"
        );
    }

    #[test]
    fn test_dispatch_error_strategy_source() {
        let err = DispatchError::from(Box::new(Unreachable) as StrategyError);

        assert_eq!(err.to_string(), "async strategy failed: host unreachable");
        assert_eq!(err.source().unwrap().to_string(), "host unreachable");
        assert!(err.strategy_error().is_some());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_dispatch_error_predicates() {
        assert!(DispatchError::Cancelled.is_cancelled());
        assert!(DispatchError::Timeout {
            duration: Duration::from_secs(1)
        }
        .is_timeout());
        assert!(DispatchError::Cancelled.source().is_none());
    }
}
