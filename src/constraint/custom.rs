//! Caller-defined constraints and constraint wrappers.

use super::{render, Constraint};
use std::fmt::{self, Debug};

/// A closure predicate with a message template.
#[derive(Clone)]
pub struct Satisfies<F> {
    predicate: F,
    template: String,
}

impl<F> Debug for Satisfies<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satisfies")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl<V: ?Sized, F> Constraint<V> for Satisfies<F>
where
    F: Fn(&V) -> bool + Send + Sync,
{
    #[inline]
    fn is_valid(&self, value: &V) -> bool {
        (self.predicate)(value)
    }

    fn format_error_message(&self, field: &str) -> String {
        render(&self.template, field)
    }
}

/// Create a constraint from any predicate.
///
/// `{field}` in `template` is replaced by the field name.
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
///
/// let even = satisfies(|n: &i32| n % 2 == 0, "The field {field} must be even.");
/// assert!(even.is_valid(&4));
/// assert!(!even.is_valid(&3));
/// assert_eq!(even.format_error_message("Count"), "The field Count must be even.");
/// ```
pub fn satisfies<V: ?Sized, F>(predicate: F, template: impl Into<String>) -> Satisfies<F>
where
    F: Fn(&V) -> bool + Send + Sync,
{
    Satisfies {
        predicate,
        template: template.into(),
    }
}

/// Overrides the message of an inner constraint.
///
/// Created by [`ConstraintExt::with_message`](super::ConstraintExt::with_message).
#[derive(Clone, Debug)]
pub struct WithMessage<C> {
    inner: C,
    template: String,
}

impl<C> WithMessage<C> {
    pub(crate) fn new(inner: C, template: impl Into<String>) -> Self {
        Self {
            inner,
            template: template.into(),
        }
    }
}

impl<V: ?Sized, C: Constraint<V>> Constraint<V> for WithMessage<C> {
    #[inline]
    fn is_valid(&self, value: &V) -> bool {
        self.inner.is_valid(value)
    }

    fn format_error_message(&self, field: &str) -> String {
        render(&self.template, field)
    }
}

/// Lifts a constraint on `V` to `Option<V>`; `None` passes.
#[derive(Clone, Copy, Debug)]
pub struct Optional<C>(C);

impl<V, C: Constraint<V>> Constraint<Option<V>> for Optional<C> {
    #[inline]
    fn is_valid(&self, value: &Option<V>) -> bool {
        value.as_ref().is_none_or(|v| self.0.is_valid(v))
    }

    fn format_error_message(&self, field: &str) -> String {
        self.0.format_error_message(field)
    }
}

/// Apply `constraint` to an optional field.
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
///
/// let p = optional(range(1, 5));
/// assert!(p.is_valid(&None));
/// assert!(p.is_valid(&Some(3)));
/// assert!(!p.is_valid(&Some(9)));
/// ```
pub fn optional<C>(constraint: C) -> Optional<C> {
    Optional(constraint)
}

/// Membership in a fixed set of allowed values.
#[derive(Clone, Debug, PartialEq)]
pub struct OneOf<T> {
    allowed: Vec<T>,
}

impl<T> Constraint<T> for OneOf<T>
where
    T: PartialEq + Debug + Send + Sync,
{
    #[inline]
    fn is_valid(&self, value: &T) -> bool {
        self.allowed.contains(value)
    }

    fn format_error_message(&self, field: &str) -> String {
        let allowed = self
            .allowed
            .iter()
            .map(|v| format!("{:?}", v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("The field {} must be one of: {}.", field, allowed)
    }
}

/// Create a constraint requiring the value to equal one of `allowed`.
///
/// Useful for string-coded enums coming from untyped input.
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
///
/// let p = one_of(["draft".to_string(), "final".to_string()]);
/// assert!(p.is_valid(&"draft".to_string()));
/// assert!(!p.is_valid(&"deleted".to_string()));
/// ```
pub fn one_of<T, I>(allowed: I) -> OneOf<T>
where
    I: IntoIterator<Item = T>,
{
    OneOf {
        allowed: allowed.into_iter().collect(),
    }
}
