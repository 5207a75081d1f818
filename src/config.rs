//! Dispatcher configuration.

#[cfg(feature = "async")]
use std::time::Duration;

/// Order in which async dispatch merges custom and default findings.
///
/// The sync path always reports default (schema) errors first. The async
/// path follows the same order unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MergeOrder {
    /// Schema errors, then strategy errors. Same as the sync path.
    #[default]
    DefaultFirst,
    /// Strategy errors, then schema errors.
    CustomFirst,
}

/// Settings for a [`StrategyValidator`](crate::StrategyValidator).
///
/// Plain data: build it once with the `with_*` methods and hand it to the
/// validator.
///
/// # Examples
///
/// ```rust
/// use sluice::{MergeOrder, ValidatorConfig};
///
/// let config = ValidatorConfig::new().with_async_order(MergeOrder::CustomFirst);
/// assert_eq!(config.async_order(), MergeOrder::CustomFirst);
/// assert_eq!(ValidatorConfig::default().async_order(), MergeOrder::DefaultFirst);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidatorConfig {
    async_order: MergeOrder,
    #[cfg(feature = "async")]
    strategy_timeout: Option<Duration>,
    #[cfg(feature = "async")]
    yield_before_default: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            async_order: MergeOrder::DefaultFirst,
            #[cfg(feature = "async")]
            strategy_timeout: None,
            #[cfg(feature = "async")]
            yield_before_default: true,
        }
    }
}

impl ValidatorConfig {
    /// Default settings: default-first merge order, no timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge order of the async path.
    pub fn with_async_order(mut self, order: MergeOrder) -> Self {
        self.async_order = order;
        self
    }

    /// Merge order of the async path.
    pub fn async_order(&self) -> MergeOrder {
        self.async_order
    }

    /// Fail async dispatch with [`DispatchError::Timeout`](crate::DispatchError::Timeout)
    /// when the async strategy runs longer than `duration`.
    #[cfg(feature = "async")]
    pub fn with_strategy_timeout(mut self, duration: Duration) -> Self {
        self.strategy_timeout = Some(duration);
        self
    }

    /// Timeout applied to async strategies, if any.
    #[cfg(feature = "async")]
    pub fn strategy_timeout(&self) -> Option<Duration> {
        self.strategy_timeout
    }

    /// Whether async dispatch yields to the runtime before running the
    /// schema, so a long schema does not starve other tasks. On by default.
    #[cfg(feature = "async")]
    pub fn with_yield_before_default(mut self, enabled: bool) -> Self {
        self.yield_before_default = enabled;
        self
    }

    /// See [`ValidatorConfig::with_yield_before_default`].
    #[cfg(feature = "async")]
    pub fn yield_before_default(&self) -> bool {
        self.yield_before_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::new();
        assert_eq!(config.async_order(), MergeOrder::DefaultFirst);
        assert_eq!(config, ValidatorConfig::default());
    }

    #[test]
    fn test_builder_is_pure() {
        let base = ValidatorConfig::new();
        let custom = base.clone().with_async_order(MergeOrder::CustomFirst);

        assert_eq!(base.async_order(), MergeOrder::DefaultFirst);
        assert_eq!(custom.async_order(), MergeOrder::CustomFirst);
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_async_settings() {
        let config = ValidatorConfig::new()
            .with_strategy_timeout(Duration::from_millis(250))
            .with_yield_before_default(false);

        assert_eq!(config.strategy_timeout(), Some(Duration::from_millis(250)));
        assert!(!config.yield_before_default());
        assert!(ValidatorConfig::new().yield_before_default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_config() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{ "async_order": "custom_first" }"#).unwrap();

        assert_eq!(config.async_order(), MergeOrder::CustomFirst);
    }
}
