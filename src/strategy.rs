//! Custom validation strategies
//!
//! A strategy is the bespoke half of validating a type: the cross-field and
//! business rules a schema cannot express. Strategies come in two flavours,
//! registered in separate slots:
//!
//! - [`ValidationStrategy<T>`]: synchronous, pure, returns a [`ValidationResult`].
//! - [`AsyncValidationStrategy<T>`]: may suspend (database lookups, remote
//!   checks) and may fail with a [`StrategyError`] when the check itself
//!   breaks.
//!
//! Plain closures are strategies too, see [`from_fn`] and [`from_async_fn`].

use crate::error::StrategyError;
use crate::result::ValidationResult;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// Synchronous validation logic for `T`.
///
/// A panic inside `validate` is a defect in the strategy and unwinds to the
/// caller of the dispatcher; it is never turned into a validation error.
///
/// # Example
///
/// ```rust
/// use sluice::{ValidationResult, ValidationStrategy};
///
/// struct Order {
///     quantity: u32,
///     backordered: bool,
/// }
///
/// struct BackorderRule;
///
/// impl ValidationStrategy<Order> for BackorderRule {
///     fn validate(&self, order: &Order) -> ValidationResult {
///         let mut result = ValidationResult::new();
///         if order.backordered && order.quantity > 10 {
///             result.add_error("quantity", "Backorders are limited to 10 units.");
///         }
///         result
///     }
/// }
///
/// let rule = BackorderRule;
/// assert!(!rule.validate(&Order { quantity: 11, backordered: true }).is_valid());
/// ```
pub trait ValidationStrategy<T: ?Sized>: Send + Sync {
    /// Validate `value`.
    fn validate(&self, value: &T) -> ValidationResult;
}

impl<T: ?Sized, F> ValidationStrategy<T> for F
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    #[inline]
    fn validate(&self, value: &T) -> ValidationResult {
        self(value)
    }
}

/// Asynchronous validation logic for `T`.
///
/// Return `Ok` with the findings, or `Err` when the check could not be
/// performed at all. The error is surfaced to the caller unchanged.
///
/// # Example
///
/// ```rust
/// use futures::future::BoxFuture;
/// use sluice::{AsyncValidationStrategy, StrategyError, ValidationResult};
///
/// struct Username(String);
///
/// struct NotTaken {
///     taken: Vec<String>,
/// }
///
/// impl AsyncValidationStrategy<Username> for NotTaken {
///     fn validate<'a>(
///         &'a self,
///         value: &'a Username,
///     ) -> BoxFuture<'a, Result<ValidationResult, StrategyError>> {
///         Box::pin(async move {
///             let mut result = ValidationResult::new();
///             if self.taken.contains(&value.0) {
///                 result.add_error("username", "That username is taken.");
///             }
///             Ok(result)
///         })
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let check = NotTaken { taken: vec!["root".into()] };
/// let result = check.validate(&Username("root".into())).await.unwrap();
/// assert!(result.has_error_for("username"));
/// # });
/// ```
pub trait AsyncValidationStrategy<T: ?Sized>: Send + Sync {
    /// Validate `value`.
    fn validate<'a>(&'a self, value: &'a T)
        -> BoxFuture<'a, Result<ValidationResult, StrategyError>>;
}

/// A sync strategy built from a closure.
///
/// Created by [`from_fn`]. Mostly useful when the closure type needs a name.
pub struct FnStrategy<F>(F);

impl<F> fmt::Debug for FnStrategy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnStrategy").finish()
    }
}

impl<T: ?Sized, F> ValidationStrategy<T> for FnStrategy<F>
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    #[inline]
    fn validate(&self, value: &T) -> ValidationResult {
        (self.0)(value)
    }
}

/// Wrap a closure as a sync strategy.
///
/// Closures already implement [`ValidationStrategy`]; this only pins down
/// the argument type where inference needs help.
///
/// # Example
///
/// ```rust
/// use sluice::strategy::from_fn;
/// use sluice::{ValidationResult, ValidationStrategy};
///
/// let strategy = from_fn(|n: &i32| {
///     let mut result = ValidationResult::new();
///     if *n % 2 != 0 {
///         result.add_error("n", "must be even");
///     }
///     result
/// });
///
/// assert!(strategy.validate(&4).is_valid());
/// ```
pub fn from_fn<T: ?Sized, F>(f: F) -> FnStrategy<F>
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    FnStrategy(f)
}

/// An async strategy built from a closure returning a future.
///
/// Created by [`from_async_fn`].
pub struct AsyncFnStrategy<F>(F);

impl<F> fmt::Debug for AsyncFnStrategy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AsyncFnStrategy").finish()
    }
}

impl<T, F, Fut> AsyncValidationStrategy<T> for AsyncFnStrategy<F>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ValidationResult, StrategyError>> + Send + 'static,
{
    fn validate<'a>(
        &'a self,
        value: &'a T,
    ) -> BoxFuture<'a, Result<ValidationResult, StrategyError>> {
        Box::pin((self.0)(value.clone()))
    }
}

/// Wrap an async closure as an async strategy.
///
/// The closure takes the value by ownership (a clone), which keeps the
/// returned future free of borrows. Implement [`AsyncValidationStrategy`]
/// directly to validate by reference.
///
/// # Example
///
/// ```rust
/// use sluice::strategy::from_async_fn;
/// use sluice::{AsyncValidationStrategy, StrategyError, ValidationResult};
///
/// let strategy = from_async_fn(|code: String| async move {
///     let mut result = ValidationResult::new();
///     if code.len() != 6 {
///         result.add_error("code", "must be 6 characters");
///     }
///     Ok::<_, StrategyError>(result)
/// });
///
/// # tokio_test::block_on(async {
/// let result = strategy.validate(&"12345".to_string()).await.unwrap();
/// assert!(result.has_error_for("code"));
/// # });
/// ```
pub fn from_async_fn<T, F, Fut>(f: F) -> AsyncFnStrategy<F>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ValidationResult, StrategyError>> + Send + 'static,
{
    AsyncFnStrategy(f)
}
