//! Presence checks.

use super::Constraint;
use std::collections::{BTreeMap, HashMap};

/// Values that can be "missing" without being absent from the struct.
///
/// Strings count as missing when blank, collections when empty.
pub trait Presence {
    /// Whether the value counts as supplied.
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    #[inline]
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl Presence for str {
    #[inline]
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for String {
    #[inline]
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl<T> Presence for [T] {
    #[inline]
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    #[inline]
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Presence for HashMap<K, V, S> {
    #[inline]
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    #[inline]
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Constraint requiring a [`Presence`] value to be supplied.
#[derive(Clone, Copy, Default, Debug)]
pub struct Required;

impl<V: Presence + ?Sized> Constraint<V> for Required {
    #[inline]
    fn is_valid(&self, value: &V) -> bool {
        value.is_present()
    }

    fn format_error_message(&self, field: &str) -> String {
        format!("The {} field is required.", field)
    }
}

/// Create a constraint that fails on `None`, blank strings and empty collections.
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
///
/// assert!(required().is_valid(&Some(3)));
/// assert!(!required().is_valid(&None::<i32>));
/// assert!(!required().is_valid("   "));
/// assert!(!required().is_valid(&Vec::<u8>::new()));
/// ```
pub fn required() -> Required {
    Required
}
