//! Field constraints consumed by the default validator
//!
//! A [`Constraint`] is the two-method contract the schema validator calls
//! into: `is_valid` decides, `format_error_message` explains. Anything that
//! honors it can be attached to a schema field, so an existing predicate
//! library can be plugged in with a small adapter (or with [`satisfies`]).
//!
//! The built-ins cover the usual declarative checks and use the familiar
//! data-annotation message templates:
//!
//! - [`required`]: value must be present (`Some`, non-blank string, non-empty vec)
//! - [`range`]: inclusive numeric (or any `PartialOrd`) bounds
//! - [`length`], [`min_length`], [`max_length`]: length bounds for strings and collections
//! - [`one_of`]: membership in a fixed set
//! - [`satisfies`]: any closure with a caller-supplied message template
//!
//! Every constraint can be wrapped with [`ConstraintExt::with_message`] to
//! override its message, and with [`ConstraintExt::optional`] to apply it to
//! `Option<V>` fields (where `None` passes).
//!
//! # Example
//!
//! ```rust
//! use sluice::constraint::*;
//!
//! let age = range(18, 130);
//! assert!(age.is_valid(&42));
//! assert!(!age.is_valid(&12));
//! assert_eq!(
//!     age.format_error_message("Age"),
//!     "The field Age must be between 18 and 130."
//! );
//!
//! let nickname = length(3, 16).optional();
//! assert!(nickname.is_valid(&None::<String>));
//! assert!(!nickname.is_valid(&Some("ab".to_string())));
//! ```

mod bounds;
mod custom;
mod presence;

pub use bounds::{length, max_length, min_length, range, Length, Measured, Range};
pub use custom::{one_of, optional, satisfies, OneOf, Optional, Satisfies, WithMessage};
pub use presence::{required, Presence, Required};

/// Placeholder replaced by the field name in message templates.
pub const FIELD_PLACEHOLDER: &str = "{field}";

/// A declarative check attached to a field of type `V`.
///
/// Implementations must be pure: the default validator may call them from
/// any thread and in any number of concurrent validations.
pub trait Constraint<V: ?Sized>: Send + Sync {
    /// Whether `value` satisfies the constraint.
    fn is_valid(&self, value: &V) -> bool;

    /// The failure message for a field named `field`.
    fn format_error_message(&self, field: &str) -> String;
}

impl<V: ?Sized, C: Constraint<V> + ?Sized> Constraint<V> for Box<C> {
    #[inline]
    fn is_valid(&self, value: &V) -> bool {
        (**self).is_valid(value)
    }

    fn format_error_message(&self, field: &str) -> String {
        (**self).format_error_message(field)
    }
}

/// Extension methods for constraint types.
///
/// Implemented for every built-in constraint; implement it (with no body)
/// for your own constraint types to get the same helpers.
pub trait ConstraintExt: Sized {
    /// Replace the failure message with `template`.
    ///
    /// `{field}` in the template is replaced by the field name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sluice::constraint::*;
    ///
    /// let c = required().with_message("{field} please");
    /// assert_eq!(Constraint::<String>::format_error_message(&c, "Name"), "Name please");
    /// ```
    fn with_message(self, template: impl Into<String>) -> WithMessage<Self> {
        WithMessage::new(self, template)
    }

    /// Apply this constraint to `Option<V>`; `None` always passes.
    ///
    /// Pair with [`required`] when the field must also be present.
    fn optional(self) -> Optional<Self> {
        optional(self)
    }
}

impl ConstraintExt for Required {}
impl<N> ConstraintExt for Range<N> {}
impl ConstraintExt for Length {}
impl<T> ConstraintExt for OneOf<T> {}
impl<F> ConstraintExt for Satisfies<F> {}
impl<C> ConstraintExt for WithMessage<C> {}
impl<C> ConstraintExt for Optional<C> {}

/// Fill a message template with a field name.
pub(crate) fn render(template: &str, field: &str) -> String {
    template.replace(FIELD_PLACEHOLDER, field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_placeholder() {
        assert_eq!(render("{field} and {field}", "x"), "x and x");
        assert_eq!(render("no placeholder", "x"), "no placeholder");
    }

    #[test]
    fn test_boxed_constraint_delegates() {
        let boxed: Box<dyn Constraint<i32>> = Box::new(range(1, 3));
        assert!(boxed.is_valid(&2));
        assert!(!boxed.is_valid(&4));
        assert_eq!(
            boxed.format_error_message("n"),
            "The field n must be between 1 and 3."
        );
    }
}
