//! Aggregated validation outcomes
//!
//! A [`ValidationResult`] is an ordered list of [`ValidationError`]s. It is
//! valid exactly when the list is empty. Every validation call in this crate
//! returns one, so failures from the schema and from custom strategies can be
//! merged instead of short-circuiting on the first problem.
//!
//! # Examples
//!
//! ```rust
//! use sluice::ValidationResult;
//!
//! let mut result = ValidationResult::new();
//! assert!(result.is_valid());
//!
//! result
//!     .add_error("Email", "The Email field is required.")
//!     .add_error("Age", "The field Age must be between 18 and 130.");
//!
//! assert!(!result.is_valid());
//! assert!(result.has_error_for("Email"));
//! assert_eq!(result.len(), 2);
//! ```

use crate::error::UsageError;
use std::fmt;

/// A single failure: the logical field name and a human-readable message.
///
/// Both parts are guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    /// Create an error, rejecting blank field names and messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::{UsageError, ValidationError};
    ///
    /// let err = ValidationError::new("Name", "too short").unwrap();
    /// assert_eq!(err.field(), "Name");
    ///
    /// assert_eq!(ValidationError::new("Name", "").unwrap_err(), UsageError::EmptyMessage);
    /// ```
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Result<Self, UsageError> {
        let field = field.into();
        let message = message.into();

        if field.trim().is_empty() {
            return Err(UsageError::EmptyField);
        }
        if message.trim().is_empty() {
            return Err(UsageError::EmptyMessage);
        }

        Ok(Self { field, message })
    }

    /// The logical name of the failing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prepend `prefix` to the field name.
    pub(crate) fn prefixed(self, prefix: &str) -> Self {
        Self {
            field: format!("{}{}", prefix, self.field),
            message: self.message,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered accumulation of [`ValidationError`]s.
///
/// Errors keep their discovery order and duplicates are preserved: two
/// failing rules on the same field are two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create an empty, valid result.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Alias for [`ValidationResult::new`], reads better at return sites.
    pub fn success() -> Self {
        Self::new()
    }

    /// Build a failed result from `(field, message)` pairs, in iteration order.
    ///
    /// Pass an ordered collection (array, `Vec`, `BTreeMap`) when the order of
    /// the resulting errors matters.
    ///
    /// # Panics
    ///
    /// Panics if any field or message is empty or whitespace. Use
    /// [`ValidationResult::try_fail`] to get a [`UsageError`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::ValidationResult;
    ///
    /// let result = ValidationResult::fail([("a", "msg1"), ("b", "msg2")]);
    /// assert_eq!(result.len(), 2);
    /// assert!(result.has_error_for("a"));
    /// assert!(!result.has_error_for("c"));
    /// ```
    pub fn fail<I, F, M>(errors: I) -> Self
    where
        I: IntoIterator<Item = (F, M)>,
        F: Into<String>,
        M: Into<String>,
    {
        match Self::try_fail(errors) {
            Ok(result) => result,
            Err(err) => panic!("invalid validation error: {}", err),
        }
    }

    /// Fallible form of [`ValidationResult::fail`].
    pub fn try_fail<I, F, M>(errors: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = (F, M)>,
        F: Into<String>,
        M: Into<String>,
    {
        let errors = errors
            .into_iter()
            .map(|(field, message)| ValidationError::new(field, message))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { errors })
    }

    /// Append one error and return `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `field` or `message` is empty or whitespace. A blank field
    /// name is a bug in the calling rule, not a finding about the data.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        if let Err(err) = self.try_add_error(field, message) {
            panic!("invalid validation error: {}", err);
        }
        self
    }

    /// Append one error, or report why it was rejected.
    ///
    /// The result is left untouched on error.
    pub fn try_add_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, UsageError> {
        self.errors.push(ValidationError::new(field, message)?);
        Ok(self)
    }

    /// Append an already-built error.
    pub fn push(&mut self, error: ValidationError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// `true` iff no errors were recorded.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Same as [`ValidationResult::is_valid`], for collection-style call sites.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors, in discovery order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `true` iff some error was recorded against exactly `field`.
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Messages recorded against exactly `field`, in order.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Append every error of `other` after the existing ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::ValidationResult;
    ///
    /// let mut first = ValidationResult::fail([("a", "one")]);
    /// first.merge(ValidationResult::fail([("b", "two")]));
    ///
    /// let fields: Vec<_> = first.errors().iter().map(|e| e.field()).collect();
    /// assert_eq!(fields, vec!["a", "b"]);
    /// ```
    pub fn merge(&mut self, other: ValidationResult) -> &mut Self {
        self.errors.extend(other.errors);
        self
    }

    /// Append every error of `other`, prefixing each field name.
    ///
    /// Useful when several values are validated together and their fields
    /// have to be told apart, e.g. `"billing."` and `"shipping."`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::ValidationResult;
    ///
    /// let mut all = ValidationResult::new();
    /// all.extend_prefixed(ValidationResult::fail([("Zip", "required")]), "billing.");
    ///
    /// assert!(all.has_error_for("billing.Zip"));
    /// ```
    pub fn extend_prefixed(&mut self, other: ValidationResult, prefix: &str) -> &mut Self {
        self.errors
            .extend(other.errors.into_iter().map(|e| e.prefixed(prefix)));
        self
    }

    /// `Ok(value)` when valid, otherwise `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sluice::ValidationResult;
    ///
    /// assert_eq!(ValidationResult::new().into_result(7), Ok(7));
    /// assert!(ValidationResult::fail([("a", "bad")]).into_result(7).is_err());
    /// ```
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationResult> {
        if self.is_valid() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Consume the result and return its errors.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "validation succeeded");
        }

        write!(f, "validation failed: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}

impl FromIterator<ValidationError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ValidationError> for ValidationResult {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
