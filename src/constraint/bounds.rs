//! Range and length bounds.

use super::Constraint;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

/// Inclusive bounds on a `PartialOrd` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range<N> {
    min: N,
    max: N,
}

impl<N> Constraint<N> for Range<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    #[inline]
    fn is_valid(&self, value: &N) -> bool {
        *value >= self.min && *value <= self.max
    }

    fn format_error_message(&self, field: &str) -> String {
        format!(
            "The field {} must be between {} and {}.",
            field, self.min, self.max
        )
    }
}

/// Create a constraint requiring `min <= value <= max`.
///
/// Incomparable values (`NaN`) fail.
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
///
/// let p = range(0.0, 1.0);
/// assert!(p.is_valid(&0.5));
/// assert!(!p.is_valid(&f64::NAN));
/// ```
pub fn range<N: PartialOrd + Display>(min: N, max: N) -> Range<N> {
    Range { min, max }
}

/// Things with a length.
///
/// Strings are measured in characters, not bytes.
pub trait Measured {
    /// The length used by [`Length`].
    fn measure(&self) -> usize;
}

impl Measured for str {
    #[inline]
    fn measure(&self) -> usize {
        self.chars().count()
    }
}

impl Measured for String {
    #[inline]
    fn measure(&self) -> usize {
        self.as_str().measure()
    }
}

impl<T> Measured for [T] {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T> Measured for Vec<T> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Measured for HashMap<K, V, S> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<K, V> Measured for BTreeMap<K, V> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

/// Inclusive bounds on a [`Measured`] length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: usize,
}

impl<V: Measured + ?Sized> Constraint<V> for Length {
    #[inline]
    fn is_valid(&self, value: &V) -> bool {
        let len = value.measure();
        len >= self.min && len <= self.max
    }

    fn format_error_message(&self, field: &str) -> String {
        match (self.min, self.max) {
            (0, usize::MAX) => format!("The field {} must have a valid length.", field),
            (0, max) => format!(
                "The field {} must have a maximum length of '{}'.",
                field, max
            ),
            (min, usize::MAX) => format!(
                "The field {} must have a minimum length of '{}'.",
                field, min
            ),
            (min, max) => format!(
                "The field {} must have a length between {} and {}.",
                field, min, max
            ),
        }
    }
}

/// Create a constraint requiring `min <= len <= max`.
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
///
/// let p = length(3, 5);
/// assert!(!p.is_valid("ab"));
/// assert!(p.is_valid("abc"));
/// assert!(p.is_valid("héllo"));
/// assert!(!p.is_valid(&vec![0; 6]));
/// ```
pub fn length(min: usize, max: usize) -> Length {
    Length { min, max }
}

/// Create a constraint requiring a length of at least `min`.
pub fn min_length(min: usize) -> Length {
    Length {
        min,
        max: usize::MAX,
    }
}

/// Create a constraint requiring a length of at most `max`.
pub fn max_length(max: usize) -> Length {
    Length { min: 0, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        let p = range(1, 10);
        assert!(p.is_valid(&1));
        assert!(p.is_valid(&10));
        assert!(!p.is_valid(&0));
        assert!(!p.is_valid(&11));
    }

    #[test]
    fn test_range_on_strings() {
        let p = range("b".to_string(), "d".to_string());
        assert!(p.is_valid(&"c".to_string()));
        assert!(!p.is_valid(&"e".to_string()));
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(length(2, 2).is_valid("é!"));
        assert!(!length(3, 3).is_valid("é!"));
    }

    #[test]
    fn test_length_messages() {
        assert_eq!(
            Constraint::<str>::format_error_message(&length(2, 4), "Code"),
            "The field Code must have a length between 2 and 4."
        );
        assert_eq!(
            Constraint::<str>::format_error_message(&min_length(2), "Code"),
            "The field Code must have a minimum length of '2'."
        );
        assert_eq!(
            Constraint::<str>::format_error_message(&max_length(8), "Code"),
            "The field Code must have a maximum length of '8'."
        );
    }

    #[test]
    fn test_unbounded_length_message() {
        let unbounded = length(0, usize::MAX);
        assert!(unbounded.is_valid(""));
        assert_eq!(
            Constraint::<str>::format_error_message(&unbounded, "Code"),
            "The field Code must have a valid length."
        );
    }

    #[test]
    fn test_length_on_collections() {
        let mut tags = BTreeMap::new();
        assert!(!min_length(1).is_valid(&tags));
        tags.insert("a", 1);
        assert!(min_length(1).is_valid(&tags));
        assert!(max_length(2).is_valid(&[1, 2][..]));
    }
}
