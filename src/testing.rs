//! Testing utilities for code that validates with sluice
//!
//! Assertion macros for [`ValidationResult`](crate::ValidationResult) and,
//! with the `proptest` feature, [`Arbitrary`](proptest::arbitrary::Arbitrary)
//! impls for [`ValidationError`](crate::ValidationError) and
//! [`ValidationResult`](crate::ValidationResult).
//!
//! # Examples
//!
//! ```rust
//! use sluice::{assert_errors, assert_invalid, assert_valid, ValidationResult};
//!
//! assert_valid!(ValidationResult::new());
//!
//! let result = ValidationResult::fail([("Name", "The Name field is required.")]);
//! assert_invalid!(result.clone());
//! assert_errors!(result, [("Name", "The Name field is required.")]);
//! ```

/// Assert that a validation result has no errors.
///
/// Panics with the collected errors otherwise.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_valid, ValidationResult};
///
/// assert_valid!(ValidationResult::new());
/// ```
#[macro_export]
macro_rules! assert_valid {
    ($result:expr) => {
        match &$result {
            result if $crate::ValidationResult::is_valid(result) => {}
            result => panic!("Expected valid result, got errors: {:?}", result.errors()),
        }
    };
}

/// Assert that a validation result has at least one error.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_invalid, ValidationResult};
///
/// assert_invalid!(ValidationResult::fail([("x", "bad")]));
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($result:expr) => {
        if $crate::ValidationResult::is_valid(&$result) {
            panic!("Expected invalid result, got no errors");
        }
    };
}

/// Assert that a validation result holds exactly the given
/// `(field, message)` pairs, in order.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_errors, ValidationResult};
///
/// let result = ValidationResult::fail([("a", "one"), ("b", "two")]);
/// assert_errors!(result, [("a", "one"), ("b", "two")]);
/// ```
#[macro_export]
macro_rules! assert_errors {
    ($result:expr, [$(($field:expr, $message:expr)),* $(,)?]) => {{
        let result = &$result;
        let actual: ::std::vec::Vec<(&str, &str)> = $crate::ValidationResult::errors(result)
            .iter()
            .map(|e| (e.field(), e.message()))
            .collect();
        let expected: ::std::vec::Vec<(&str, &str)> = ::std::vec![$(($field, $message)),*];
        assert_eq!(actual, expected, "validation errors differ");
    }};
}

#[cfg(feature = "proptest")]
use crate::result::{ValidationError, ValidationResult};
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for ValidationError {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        ("[A-Za-z][A-Za-z0-9_.]{0,11}", "[a-z]{1,8}( [a-z]{1,8}){0,3}")
            .prop_filter_map("field and message must be non-blank", |(field, message)| {
                ValidationError::new(field, message).ok()
            })
            .boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for ValidationResult {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::collection::vec(any::<ValidationError>(), 0..6)
            .prop_map(ValidationResult::from_iter)
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::ValidationResult;

    #[test]
    fn assert_valid_macro() {
        assert_valid!(ValidationResult::new());
    }

    #[test]
    fn assert_invalid_macro() {
        assert_invalid!(ValidationResult::fail([("x", "bad")]));
    }

    #[test]
    fn assert_errors_macro() {
        let result = ValidationResult::fail([("a", "one"), ("b", "two")]);
        assert_errors!(result, [("a", "one"), ("b", "two")]);
        assert_errors!(ValidationResult::new(), []);
    }

    #[test]
    fn assert_errors_accepts_temporaries() {
        fn build() -> ValidationResult {
            ValidationResult::fail([("Name", "required")])
        }

        assert_errors!(build(), [("Name", "required")]);
        assert_errors!(ValidationResult::fail([("a", "one")]), [("a", "one")]);
    }

    #[test]
    #[should_panic(expected = "Expected valid result")]
    fn assert_valid_panics_on_errors() {
        assert_valid!(ValidationResult::fail([("x", "bad")]));
    }

    #[test]
    #[should_panic(expected = "Expected invalid result")]
    fn assert_invalid_panics_on_success() {
        assert_invalid!(ValidationResult::new());
    }

    #[test]
    #[should_panic(expected = "validation errors differ")]
    fn assert_errors_panics_on_order_mismatch() {
        let result = ValidationResult::fail([("a", "one"), ("b", "two")]);
        assert_errors!(result, [("b", "two"), ("a", "one")]);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::{ValidationError, ValidationResult};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_errors_are_well_formed(error in any::<ValidationError>()) {
                prop_assert!(!error.field().trim().is_empty());
                prop_assert!(!error.message().trim().is_empty());
            }

            #[test]
            fn arbitrary_results_agree_with_is_valid(result in any::<ValidationResult>()) {
                prop_assert_eq!(result.is_valid(), result.errors().is_empty());
            }
        }
    }
}
