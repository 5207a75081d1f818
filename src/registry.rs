//! Type-keyed store of schemas and strategies
//!
//! The registry owns three independent slots per type:
//!
//! - a [`Schema<T>`] for default structural validation,
//! - one sync [`ValidationStrategy<T>`],
//! - one [`AsyncValidationStrategy<T>`].
//!
//! A type may fill any subset of them. Registering into a filled slot
//! replaces its content (last write wins); strategies are never chained.
//!
//! # Exact-type lookup
//!
//! Slots are keyed by `TypeId::of::<T>()` of the type parameter. There is no
//! inheritance or trait-object fallback: a strategy registered for `Animal`
//! is not consulted when validating a `Dog`, even if `Dog` wraps or derefs to
//! `Animal`. Dispatch with `T` bound to the concrete type you registered.
//!
//! # Lifecycle
//!
//! Populate the registry at startup through `&mut` access, then move it into
//! a [`StrategyValidator`](crate::StrategyValidator). From then on it is
//! read-only and can be shared across threads without locking.
//!
//! ```rust
//! use sluice::constraint::*;
//! use sluice::{Schema, StrategyRegistry, ValidationResult};
//!
//! struct Invoice {
//!     total: i64,
//!     paid: i64,
//! }
//!
//! let mut registry = StrategyRegistry::new();
//! registry
//!     .register_schema(Schema::<Invoice>::builder().rule("total", |i| &i.total, range(0, 1_000_000)).build())
//!     .register_strategy(|i: &Invoice| {
//!         let mut result = ValidationResult::new();
//!         if i.paid > i.total {
//!             result.add_error("paid", "Payment exceeds the invoice total.");
//!         }
//!         result
//!     });
//!
//! assert!(registry.has_schema::<Invoice>());
//! assert!(registry.has_strategy::<Invoice>());
//! assert!(!registry.has_async_strategy::<Invoice>());
//! ```

use crate::result::ValidationResult;
use crate::schema::{Describe, Schema};
use crate::strategy::{AsyncValidationStrategy, ValidationStrategy};
use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// A registered check that can run against a value of unknown static type.
pub(crate) type ErasedCheck = Arc<dyn Fn(&dyn Any, &mut ValidationResult) + Send + Sync>;

/// One occupied registry slot.
struct Slot {
    type_name: &'static str,
    // Arc<dyn ValidationStrategy<T>>, Arc<dyn AsyncValidationStrategy<T>>
    // or Arc<Schema<T>>, depending on the map.
    typed: Box<dyn Any + Send + Sync>,
    erased: Option<ErasedCheck>,
}

/// Registry of per-type schemas and strategies.
#[derive(Default)]
pub struct StrategyRegistry {
    schemas: HashMap<TypeId, Slot>,
    sync_strategies: HashMap<TypeId, Slot>,
    async_strategies: HashMap<TypeId, Slot>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the sync strategy for `T`, replacing any previous one.
    pub fn register_strategy<T, S>(&mut self, strategy: S) -> &mut Self
    where
        T: Any,
        S: ValidationStrategy<T> + 'static,
    {
        let strategy: Arc<dyn ValidationStrategy<T>> = Arc::new(strategy);
        let erased_strategy = Arc::clone(&strategy);
        let erased: ErasedCheck = Arc::new(move |value: &dyn Any, result: &mut ValidationResult| {
            if let Some(value) = value.downcast_ref::<T>() {
                result.merge(erased_strategy.validate(value));
            }
        });

        let replaced = insert_slot::<T>(&mut self.sync_strategies, Box::new(strategy), Some(erased));
        log_registration::<T>("sync strategy", replaced);
        self
    }

    /// Store the async strategy for `T`, replacing any previous one.
    pub fn register_async_strategy<T, S>(&mut self, strategy: S) -> &mut Self
    where
        T: Any,
        S: AsyncValidationStrategy<T> + 'static,
    {
        let strategy: Arc<dyn AsyncValidationStrategy<T>> = Arc::new(strategy);

        let replaced = insert_slot::<T>(&mut self.async_strategies, Box::new(strategy), None);
        log_registration::<T>("async strategy", replaced);
        self
    }

    /// Store the schema used for default validation of `T`, replacing any previous one.
    pub fn register_schema<T: Any>(&mut self, schema: Schema<T>) -> &mut Self {
        let schema = Arc::new(schema);
        let erased_schema = Arc::clone(&schema);
        let erased: ErasedCheck = Arc::new(move |value: &dyn Any, result: &mut ValidationResult| {
            if let Some(value) = value.downcast_ref::<T>() {
                erased_schema.validate_into(value, result);
            }
        });

        let replaced = insert_slot::<T>(&mut self.schemas, Box::new(schema), Some(erased));
        log_registration::<T>("schema", replaced);
        self
    }

    /// Register the schema `T` declares through [`Describe`].
    pub fn register_described<T: Describe>(&mut self) -> &mut Self {
        self.register_schema(Schema::<T>::described())
    }

    /// The sync strategy registered for exactly `T`.
    pub fn strategy<T: Any>(&self) -> Option<&dyn ValidationStrategy<T>> {
        self.sync_strategies
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.typed.downcast_ref::<Arc<dyn ValidationStrategy<T>>>())
            .map(|strategy| strategy.as_ref())
    }

    /// The async strategy registered for exactly `T`.
    pub fn async_strategy<T: Any>(&self) -> Option<&dyn AsyncValidationStrategy<T>> {
        self.async_strategies
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.typed.downcast_ref::<Arc<dyn AsyncValidationStrategy<T>>>())
            .map(|strategy| strategy.as_ref())
    }

    /// The schema registered for exactly `T`.
    pub fn schema<T: Any>(&self) -> Option<&Schema<T>> {
        self.schemas
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.typed.downcast_ref::<Arc<Schema<T>>>())
            .map(|schema| schema.as_ref())
    }

    /// Whether a sync strategy is registered for `T`.
    pub fn has_strategy<T: Any>(&self) -> bool {
        self.sync_strategies.contains_key(&TypeId::of::<T>())
    }

    /// Whether an async strategy is registered for `T`.
    pub fn has_async_strategy<T: Any>(&self) -> bool {
        self.async_strategies.contains_key(&TypeId::of::<T>())
    }

    /// Whether a schema is registered for `T`.
    pub fn has_schema<T: Any>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<T>())
    }

    /// Names of every type with at least one filled slot, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.schemas
            .values()
            .chain(self.sync_strategies.values())
            .chain(self.async_strategies.values())
            .map(|slot| slot.type_name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.sync_strategies.is_empty() && self.async_strategies.is_empty()
    }

    pub(crate) fn erased_schema(&self, type_id: TypeId) -> Option<&ErasedCheck> {
        self.schemas.get(&type_id).and_then(|slot| slot.erased.as_ref())
    }

    pub(crate) fn erased_strategy(&self, type_id: TypeId) -> Option<&ErasedCheck> {
        self.sync_strategies
            .get(&type_id)
            .and_then(|slot| slot.erased.as_ref())
    }
}

fn insert_slot<T: Any>(
    map: &mut HashMap<TypeId, Slot>,
    typed: Box<dyn Any + Send + Sync>,
    erased: Option<ErasedCheck>,
) -> bool {
    map.insert(
        TypeId::of::<T>(),
        Slot {
            type_name: type_name::<T>(),
            typed,
            erased,
        },
    )
    .is_some()
}

#[allow(unused_variables)]
fn log_registration<T: Any>(kind: &'static str, replaced: bool) {
    #[cfg(feature = "tracing")]
    {
        if replaced {
            tracing::debug!(type_name = type_name::<T>(), kind, "replaced registration");
        } else {
            tracing::debug!(type_name = type_name::<T>(), kind, "registered");
        }
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn names(map: &HashMap<TypeId, Slot>) -> BTreeSet<&'static str> {
            map.values().map(|slot| slot.type_name).collect()
        }

        f.debug_struct("StrategyRegistry")
            .field("schemas", &names(&self.schemas))
            .field("sync_strategies", &names(&self.sync_strategies))
            .field("async_strategies", &names(&self.async_strategies))
            .finish()
    }
}
