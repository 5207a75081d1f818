//! Declarative per-type field rules: the default structural validator
//!
//! A [`Schema<T>`] is an ordered list of fields, each with an accessor and
//! zero or more [`Constraint`]s. Validating a value walks the fields in
//! declaration order, evaluates every constraint against the field's current
//! value and records one error per failing constraint. There is no early
//! exit: two failing constraints on one field give two errors.
//!
//! Schemas are built once, ahead of time, and need no per-type validation
//! code. A type can carry its own schema through [`Describe`].
//!
//! # Example
//!
//! ```rust
//! use sluice::constraint::*;
//! use sluice::Schema;
//!
//! struct Signup {
//!     email: String,
//!     age: Option<u32>,
//! }
//!
//! let schema = Schema::<Signup>::builder()
//!     .field("Email", |s| &s.email, |f| f.rule(required()).rule(max_length(64)))
//!     .rule("Age", |s| &s.age, range(13, 130).optional())
//!     .build();
//!
//! let result = schema.validate(&Signup { email: String::new(), age: Some(7) });
//!
//! let messages: Vec<_> = result.errors().iter().map(|e| e.message()).collect();
//! assert_eq!(
//!     messages,
//!     vec![
//!         "The Email field is required.",
//!         "The field Age must be between 13 and 130.",
//!     ]
//! );
//! ```

use crate::constraint::Constraint;
use crate::result::ValidationResult;
use std::fmt;
use std::marker::PhantomData;

/// A type that declares its own field rules.
///
/// This is the ahead-of-time replacement for attribute-driven validation:
/// the rules live next to the type and are registered with
/// [`StrategyRegistry::register_described`](crate::StrategyRegistry::register_described).
///
/// # Example
///
/// ```rust
/// use sluice::constraint::*;
/// use sluice::{Describe, Schema, SchemaBuilder};
///
/// struct Sku(String);
///
/// impl Describe for Sku {
///     fn describe(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
///         schema.rule("Sku", |s| &s.0, length(8, 8))
///     }
/// }
///
/// let schema = Schema::<Sku>::described();
/// assert!(schema.validate(&Sku("ABCD1234".into())).is_valid());
/// assert!(!schema.validate(&Sku("short".into())).is_valid());
/// ```
pub trait Describe: Sized + 'static {
    /// Add this type's fields to `schema`.
    ///
    /// # Panics
    ///
    /// A blank field name passed to [`SchemaBuilder::field`] or
    /// [`SchemaBuilder::rule`] panics when the schema is built, i.e. in
    /// [`Schema::described`] or
    /// [`StrategyRegistry::register_described`](crate::StrategyRegistry::register_described).
    fn describe(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self>;
}

/// Type-erased check for one field of `T`.
trait FieldCheck<T>: Send + Sync {
    fn check(&self, name: &str, value: &T, result: &mut ValidationResult);

    fn rule_count(&self) -> usize;
}

struct TypedField<T, V: ?Sized, A> {
    accessor: A,
    constraints: Vec<Box<dyn Constraint<V>>>,
    _marker: PhantomData<fn(&T) -> &V>,
}

impl<T, V, A> FieldCheck<T> for TypedField<T, V, A>
where
    V: ?Sized,
    A: Fn(&T) -> &V + Send + Sync,
{
    fn check(&self, name: &str, value: &T, result: &mut ValidationResult) {
        let field_value = (self.accessor)(value);

        for constraint in &self.constraints {
            if constraint.is_valid(field_value) {
                continue;
            }

            let mut message = constraint.format_error_message(name);
            if message.trim().is_empty() {
                message = format!("The field {} is invalid.", name);
            }
            result.add_error(name, message);
        }
    }

    fn rule_count(&self) -> usize {
        self.constraints.len()
    }
}

struct FieldEntry<T> {
    name: String,
    check: Box<dyn FieldCheck<T>>,
}

/// Constraints collected for a single field.
///
/// Handed to the closure passed to [`SchemaBuilder::field`].
pub struct FieldRules<V: ?Sized> {
    constraints: Vec<Box<dyn Constraint<V>>>,
}

impl<V: ?Sized> FieldRules<V> {
    fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Attach a constraint. Constraints run in the order they are added.
    pub fn rule<C>(mut self, constraint: C) -> Self
    where
        C: Constraint<V> + 'static,
    {
        self.constraints.push(Box::new(constraint));
        self
    }
}

impl<V: ?Sized> fmt::Debug for FieldRules<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("rules", &self.constraints.len())
            .finish()
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder<T> {
    fields: Vec<FieldEntry<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a field with any number of constraints.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or whitespace.
    pub fn field<V, A, R>(mut self, name: impl Into<String>, accessor: A, rules: R) -> Self
    where
        V: ?Sized + 'static,
        A: Fn(&T) -> &V + Send + Sync + 'static,
        R: FnOnce(FieldRules<V>) -> FieldRules<V>,
    {
        let name = name.into();
        assert!(!name.trim().is_empty(), "schema field name cannot be empty");

        let rules = rules(FieldRules::new());
        self.fields.push(FieldEntry {
            name,
            check: Box::new(TypedField {
                accessor,
                constraints: rules.constraints,
                _marker: PhantomData,
            }),
        });
        self
    }

    /// Declare a field with exactly one constraint.
    ///
    /// Calling it again with the same name adds another entry; the errors
    /// still come out in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or whitespace.
    pub fn rule<V, A, C>(self, name: impl Into<String>, accessor: A, constraint: C) -> Self
    where
        V: ?Sized + 'static,
        A: Fn(&T) -> &V + Send + Sync + 'static,
        C: Constraint<V> + 'static,
    {
        self.field(name, accessor, |f| f.rule(constraint))
    }

    /// Finish the schema.
    pub fn build(self) -> Schema<T> {
        Schema {
            type_name: std::any::type_name::<T>(),
            fields: self.fields,
        }
    }
}

impl<T> fmt::Debug for SchemaBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("fields", &self.fields.iter().map(|e| &e.name).collect::<Vec<_>>())
            .finish()
    }
}

/// Ordered field rules for values of type `T`.
pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<FieldEntry<T>>,
}

impl<T: 'static> Schema<T> {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }

    /// A schema with no fields. Validation always succeeds.
    pub fn empty() -> Self {
        SchemaBuilder::new().build()
    }

    /// The schema declared by `T` itself.
    pub fn described() -> Self
    where
        T: Describe,
    {
        T::describe(SchemaBuilder::new()).build()
    }
}

impl<T> Schema<T> {
    /// Evaluate every field and constraint against `value`.
    pub fn validate(&self, value: &T) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.validate_into(value, &mut result);
        result
    }

    /// Like [`Schema::validate`], appending to an existing result.
    pub fn validate_into(&self, value: &T, result: &mut ValidationResult) {
        for entry in &self.fields {
            entry.check.check(&entry.name, value, result);
        }
    }

    /// Declared field names, in order. Repeated names appear once per entry.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|e| e.name.as_str())
    }

    /// Total number of constraints across all fields.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|e| e.check.rule_count()).sum()
    }

    /// Number of declared field entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if no fields were declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `std::any::type_name` of `T`, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type", &self.type_name)
            .field("fields", &self.fields.iter().map(|e| &e.name).collect::<Vec<_>>())
            .finish()
    }
}
