//! Dispatch and aggregation
//!
//! [`StrategyValidator`] is the entry point callers use. For a value of type
//! `T` it runs the schema registered for `T` (the default structural
//! validation) and the custom strategy registered for `T`, and merges both
//! outcomes into one [`ValidationResult`].
//!
//! # Contract
//!
//! - The sync path reports schema errors first, then strategy errors.
//! - The async path uses the order configured by
//!   [`ValidatorConfig::with_async_order`] (schema first by default).
//! - A type with no strategy is validated by its schema alone; a type with
//!   neither is valid. Missing registrations are never errors.
//! - A fault raised by an async strategy is returned as
//!   [`DispatchError::Strategy`] and no partial result is produced.
//!
//! # Example
//!
//! ```rust
//! use sluice::constraint::*;
//! use sluice::{Schema, StrategyRegistry, StrategyValidator, ValidationResult};
//!
//! struct Transfer {
//!     from: String,
//!     to: String,
//!     amount: u64,
//! }
//!
//! let mut registry = StrategyRegistry::new();
//! registry
//!     .register_schema(
//!         Schema::<Transfer>::builder()
//!             .rule("from", |t| &t.from, required())
//!             .rule("amount", |t| &t.amount, range(1, 10_000))
//!             .build(),
//!     )
//!     .register_strategy(|t: &Transfer| {
//!         let mut result = ValidationResult::new();
//!         if t.from == t.to {
//!             result.add_error("to", "Cannot transfer to the same account.");
//!         }
//!         result
//!     });
//!
//! let validator = StrategyValidator::new(registry);
//! let result = validator.validate(&Transfer {
//!     from: String::new(),
//!     to: String::new(),
//!     amount: 50,
//! });
//!
//! let fields: Vec<_> = result.errors().iter().map(|e| e.field()).collect();
//! assert_eq!(fields, vec!["from", "to"]);
//! ```

use crate::config::{MergeOrder, ValidatorConfig};
use crate::error::{DispatchError, UsageError};
use crate::registry::StrategyRegistry;
use crate::result::ValidationResult;
use crate::strategy::AsyncValidationStrategy;
use futures::future::{self, Either};
use std::any::Any;
use std::future::Future;

/// Runs schemas and strategies from a frozen [`StrategyRegistry`].
///
/// Every method takes `&self` and no state is written during validation,
/// so one validator can be shared (e.g. in an `Arc`) across threads and
/// tasks.
#[derive(Debug, Default)]
pub struct StrategyValidator {
    registry: StrategyRegistry,
    config: ValidatorConfig,
}

impl StrategyValidator {
    /// Freeze `registry` with the default configuration.
    pub fn new(registry: StrategyRegistry) -> Self {
        Self::with_config(registry, ValidatorConfig::default())
    }

    /// Freeze `registry` with `config`.
    pub fn with_config(registry: StrategyRegistry, config: ValidatorConfig) -> Self {
        Self { registry, config }
    }

    /// The underlying registry (read-only).
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `value` against its schema, then its sync strategy.
    ///
    /// The borrow guarantees a target is always present; use
    /// [`StrategyValidator::validate_dyn`] when the value may be missing.
    ///
    /// Only the sync strategy slot is consulted. A panic inside the strategy
    /// propagates to the caller.
    pub fn validate<T: Any>(&self, value: &T) -> ValidationResult {
        #[cfg(feature = "tracing")]
        tracing::trace!(type_name = std::any::type_name::<T>(), "validating");

        let mut result = self.validate_default(value);
        if let Some(strategy) = self.registry.strategy::<T>() {
            result.merge(strategy.validate(value));
        }
        result
    }

    /// Validate `value` against its schema only.
    pub fn validate_default<T: Any>(&self, value: &T) -> ValidationResult {
        self.registry
            .schema::<T>()
            .map(|schema| schema.validate(value))
            .unwrap_or_default()
    }

    /// Validate `value` against its schema and its async strategy.
    ///
    /// Only the async strategy slot is consulted; a sync strategy registered
    /// for `T` is not run here.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Strategy`] when the async strategy fails.
    /// - [`DispatchError::Timeout`] when a strategy timeout is configured
    ///   and exceeded (requires the `async` feature).
    pub async fn validate_async<T>(&self, value: &T) -> Result<ValidationResult, DispatchError>
    where
        T: Any + Sync,
    {
        self.validate_async_until(value, future::pending::<()>()).await
    }

    /// Like [`StrategyValidator::validate_async`], abandoning the async
    /// strategy as soon as `cancel` completes.
    ///
    /// Cancellation only races the custom strategy; the schema is cheap and
    /// always runs to completion once reached.
    ///
    /// # Errors
    ///
    /// As [`StrategyValidator::validate_async`], plus
    /// [`DispatchError::Cancelled`] when `cancel` wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sluice::strategy::from_async_fn;
    /// use sluice::{StrategyError, StrategyRegistry, StrategyValidator, ValidationResult};
    ///
    /// let mut registry = StrategyRegistry::new();
    /// registry.register_async_strategy(from_async_fn(|_: u32| async {
    ///     futures::future::pending::<()>().await;
    ///     Ok::<_, StrategyError>(ValidationResult::new())
    /// }));
    ///
    /// let validator = StrategyValidator::new(registry);
    ///
    /// # tokio_test::block_on(async {
    /// let err = validator
    ///     .validate_async_until(&7u32, futures::future::ready(()))
    ///     .await
    ///     .unwrap_err();
    /// assert!(err.is_cancelled());
    /// # });
    /// ```
    pub async fn validate_async_until<T, C>(
        &self,
        value: &T,
        cancel: C,
    ) -> Result<ValidationResult, DispatchError>
    where
        T: Any + Sync,
        C: Future<Output = ()>,
    {
        let dispatch = self.dispatch_async(value, cancel);

        #[cfg(feature = "tracing")]
        let dispatch = tracing::Instrument::instrument(
            dispatch,
            tracing::debug_span!("validate_async", type_name = std::any::type_name::<T>()),
        );

        dispatch.await
    }

    async fn dispatch_async<T, C>(
        &self,
        value: &T,
        cancel: C,
    ) -> Result<ValidationResult, DispatchError>
    where
        T: Any + Sync,
        C: Future<Output = ()>,
    {
        let custom = match self.registry.async_strategy::<T>() {
            Some(strategy) => Some(self.run_async_strategy(strategy, value, cancel).await?),
            None => None,
        };

        self.yield_before_default().await;
        let default = self.validate_default(value);

        let result = match (self.config.async_order(), custom) {
            (_, None) => default,
            (MergeOrder::DefaultFirst, Some(custom)) => {
                let mut result = default;
                result.merge(custom);
                result
            }
            (MergeOrder::CustomFirst, Some(mut custom)) => {
                custom.merge(default);
                custom
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(errors = result.len(), "async validation finished");

        Ok(result)
    }

    async fn run_async_strategy<T, C>(
        &self,
        strategy: &dyn AsyncValidationStrategy<T>,
        value: &T,
        cancel: C,
    ) -> Result<ValidationResult, DispatchError>
    where
        T: Any + Sync,
        C: Future<Output = ()>,
    {
        let outcome = async {
            #[cfg(feature = "async")]
            if let Some(duration) = self.config.strategy_timeout() {
                return match tokio::time::timeout(duration, strategy.validate(value)).await {
                    Ok(outcome) => outcome.map_err(DispatchError::Strategy),
                    Err(_) => Err(DispatchError::Timeout { duration }),
                };
            }

            strategy.validate(value).await.map_err(DispatchError::Strategy)
        };

        futures::pin_mut!(outcome);
        futures::pin_mut!(cancel);

        let outcome = match future::select(outcome, cancel).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(((), _)) => Err(DispatchError::Cancelled),
        };

        #[cfg(feature = "tracing")]
        if let Err(err) = &outcome {
            tracing::warn!(
                type_name = std::any::type_name::<T>(),
                error = %err,
                "async strategy did not complete"
            );
        }

        outcome
    }

    async fn yield_before_default(&self) {
        #[cfg(feature = "async")]
        if self.config.yield_before_default() {
            tokio::task::yield_now().await;
        }
    }

    /// Validate a value by its runtime type.
    ///
    /// The schema and sync strategy registered for the value's concrete type
    /// are applied exactly as [`StrategyValidator::validate`] would for that
    /// type. This is the entry point for callers that hold heterogeneous,
    /// possibly missing arguments (e.g. a request binder).
    ///
    /// # Errors
    ///
    /// [`UsageError::MissingValue`] when `value` is `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::any::Any;
    /// use sluice::{StrategyRegistry, StrategyValidator, UsageError, ValidationResult};
    ///
    /// let mut registry = StrategyRegistry::new();
    /// registry.register_strategy(|n: &i32| {
    ///     if *n < 0 {
    ///         ValidationResult::fail([("n", "must not be negative")])
    ///     } else {
    ///         ValidationResult::new()
    ///     }
    /// });
    /// let validator = StrategyValidator::new(registry);
    ///
    /// let args: Vec<Box<dyn Any>> = vec![Box::new(-1i32), Box::new("ignored")];
    /// let result = validator.validate_dyn(Some(args[0].as_ref())).unwrap();
    /// assert!(result.has_error_for("n"));
    /// assert!(validator.validate_dyn(Some(args[1].as_ref())).unwrap().is_valid());
    ///
    /// assert_eq!(validator.validate_dyn(None).unwrap_err(), UsageError::MissingValue);
    /// ```
    pub fn validate_dyn(&self, value: Option<&dyn Any>) -> Result<ValidationResult, UsageError> {
        let value = value.ok_or(UsageError::MissingValue)?;
        let type_id = (*value).type_id();

        let mut result = ValidationResult::new();
        if let Some(check) = self.registry.erased_schema(type_id) {
            check(value, &mut result);
        }
        if let Some(check) = self.registry.erased_strategy(type_id) {
            check(value, &mut result);
        }
        Ok(result)
    }
}

impl From<StrategyRegistry> for StrategyValidator {
    fn from(registry: StrategyRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::required;
    use crate::error::StrategyError;
    use crate::schema::Schema;
    use futures::future::BoxFuture;

    #[derive(Debug, Clone, Default)]
    struct Profile {
        name: String,
    }

    struct BadField;

    impl AsyncValidationStrategy<Profile> for BadField {
        fn validate<'a>(
            &'a self,
            _value: &'a Profile,
        ) -> BoxFuture<'a, Result<ValidationResult, StrategyError>> {
            Box::pin(async { Ok(ValidationResult::fail([("x", "bad field")])) })
        }
    }

    struct Broken;

    impl AsyncValidationStrategy<Profile> for Broken {
        fn validate<'a>(
            &'a self,
            _value: &'a Profile,
        ) -> BoxFuture<'a, Result<ValidationResult, StrategyError>> {
            Box::pin(async { Err("lookup service unavailable".into()) })
        }
    }

    fn registry() -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        registry
            .register_schema(
                Schema::<Profile>::builder()
                    .rule("Name", |p| &p.name, required())
                    .build(),
            )
            .register_strategy(|_: &Profile| ValidationResult::fail([("x", "bad field")]))
            .register_async_strategy(BadField);
        registry
    }

    fn fields(result: &ValidationResult) -> Vec<&str> {
        result.errors().iter().map(|e| e.field()).collect()
    }

    #[test]
    fn test_sync_default_then_custom() {
        let validator = StrategyValidator::new(registry());
        let result = validator.validate(&Profile::default());

        assert_eq!(fields(&result), vec!["Name", "x"]);
        assert_eq!(result.errors()[1].message(), "bad field");
    }

    #[test]
    fn test_unregistered_type_is_valid() {
        let validator = StrategyValidator::new(StrategyRegistry::new());
        assert!(validator.validate(&Profile::default()).is_valid());
    }

    #[test]
    fn test_validate_default_skips_strategy() {
        let validator = StrategyValidator::new(registry());
        let result = validator.validate_default(&Profile::default());
        assert_eq!(fields(&result), vec!["Name"]);
    }

    #[tokio::test]
    async fn test_async_default_order() {
        let validator = StrategyValidator::new(registry());
        let result = validator.validate_async(&Profile::default()).await.unwrap();
        assert_eq!(fields(&result), vec!["Name", "x"]);
    }

    #[tokio::test]
    async fn test_async_custom_first_order() {
        let validator = StrategyValidator::with_config(
            registry(),
            ValidatorConfig::new().with_async_order(MergeOrder::CustomFirst),
        );
        let result = validator.validate_async(&Profile::default()).await.unwrap();
        assert_eq!(fields(&result), vec!["x", "Name"]);
    }

    #[tokio::test]
    async fn test_async_fault_propagates() {
        let mut registry = registry();
        registry.register_async_strategy(Broken);
        let validator = StrategyValidator::new(registry);

        let err = validator
            .validate_async(&Profile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Strategy(_)));
        assert_eq!(err.to_string(), "async strategy failed: lookup service unavailable");
    }

    #[tokio::test]
    async fn test_async_without_strategy_is_default_only() {
        let mut registry = StrategyRegistry::new();
        registry.register_schema(
            Schema::<Profile>::builder()
                .rule("Name", |p| &p.name, required())
                .build(),
        );
        let validator = StrategyValidator::new(registry);

        let result = validator.validate_async(&Profile::default()).await.unwrap();
        assert_eq!(fields(&result), vec!["Name"]);
    }

    #[test]
    fn test_validate_dyn_matches_static_dispatch() {
        let validator = StrategyValidator::new(registry());
        let profile = Profile::default();

        let dynamic = validator.validate_dyn(Some(&profile as &dyn Any)).unwrap();
        assert_eq!(dynamic, validator.validate(&profile));
    }

    #[test]
    fn test_validate_dyn_missing_value() {
        let validator = StrategyValidator::new(registry());
        assert_eq!(
            validator.validate_dyn(None).unwrap_err(),
            UsageError::MissingValue
        );
    }

    #[cfg(feature = "tracing")]
    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_async_fault_is_logged() {
        let mut registry = StrategyRegistry::new();
        registry.register_async_strategy(Broken);
        let validator = StrategyValidator::new(registry);

        let _ = validator.validate_async(&Profile::default()).await;
        assert!(logs_contain("async strategy did not complete"));
        assert!(logs_contain("lookup service unavailable"));
    }

    #[test]
    fn test_validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StrategyValidator>();
    }
}
