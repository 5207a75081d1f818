//! # Sluice
//!
//! Type-keyed validation dispatch for Rust.
//!
//! Sluice routes a value to the validation logic registered for its type and
//! merges everything it finds into a single [`ValidationResult`]:
//!
//! - a **schema** ([`Schema<T>`]): declarative field rules such as
//!   [`required`](constraint::required) or [`range`](constraint::range),
//!   evaluated in declaration order;
//! - a **strategy** ([`ValidationStrategy<T>`] or
//!   [`AsyncValidationStrategy<T>`]): custom cross-field or I/O-bound checks.
//!
//! Registrations happen once, through `&mut` on a [`StrategyRegistry`]. The
//! registry is then frozen inside a [`StrategyValidator`], which only reads
//! and can be shared freely across threads and tasks.
//!
//! ## Quick Example
//!
//! ```rust
//! use sluice::constraint::*;
//! use sluice::{Schema, StrategyRegistry, StrategyValidator, ValidationResult};
//!
//! struct Booking {
//!     guest: String,
//!     nights: u32,
//!     check_in: u32,
//!     check_out: u32,
//! }
//!
//! let mut registry = StrategyRegistry::new();
//! registry
//!     .register_schema(
//!         Schema::<Booking>::builder()
//!             .rule("Guest", |b| &b.guest, required())
//!             .rule("Nights", |b| &b.nights, range(1, 30))
//!             .build(),
//!     )
//!     .register_strategy(|b: &Booking| {
//!         let mut result = ValidationResult::new();
//!         if b.check_out <= b.check_in {
//!             result.add_error("CheckOut", "Check-out must be after check-in.");
//!         }
//!         result
//!     });
//!
//! let validator = StrategyValidator::new(registry);
//! let result = validator.validate(&Booking {
//!     guest: "  ".into(),
//!     nights: 2,
//!     check_in: 10,
//!     check_out: 9,
//! });
//!
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.to_string(),
//!     "validation failed: Guest: The Guest field is required.; \
//!      CheckOut: Check-out must be after check-in."
//! );
//! ```
//!
//! ## Features
//!
//! - `async`: strategy timeouts and cooperative yielding on the async path
//!   (pulls in tokio).
//! - `tracing`: registration and dispatch events via the `tracing` crate.
//! - `serde`: `Serialize`/`Deserialize` for results and configuration.
//! - `proptest`: `Arbitrary` impls for property testing.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod constraint;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod result;
pub mod schema;
pub mod strategy;
pub mod testing;

// Re-exports
pub use config::{MergeOrder, ValidatorConfig};
pub use dispatch::StrategyValidator;
pub use error::{DispatchError, StrategyError, UsageError};
pub use registry::StrategyRegistry;
pub use result::{ValidationError, ValidationResult};
pub use schema::{Describe, FieldRules, Schema, SchemaBuilder};
pub use strategy::{AsyncValidationStrategy, ValidationStrategy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{MergeOrder, ValidatorConfig};
    pub use crate::constraint::{
        length, max_length, min_length, one_of, optional, range, required, satisfies, Constraint,
        ConstraintExt,
    };
    pub use crate::dispatch::StrategyValidator;
    pub use crate::error::{DispatchError, StrategyError, UsageError};
    pub use crate::registry::StrategyRegistry;
    pub use crate::result::{ValidationError, ValidationResult};
    pub use crate::schema::{Describe, Schema, SchemaBuilder};
    pub use crate::strategy::{from_async_fn, from_fn, AsyncValidationStrategy, ValidationStrategy};
}
