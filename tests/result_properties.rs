//! Property-based tests for result aggregation

use proptest::prelude::*;
use sluice::constraint::satisfies;
use sluice::{Schema, StrategyRegistry, StrategyValidator, ValidationResult};

fn pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Za-z][A-Za-z0-9]{0,7}", "[a-z]{1,6}( [a-z]{1,6}){0,2}"), 0..8)
}

fn as_pairs(result: &ValidationResult) -> Vec<(String, String)> {
    result
        .errors()
        .iter()
        .map(|e| (e.field().to_string(), e.message().to_string()))
        .collect()
}

#[derive(Debug, Clone)]
struct Payload {
    flag: bool,
    strategy_errors: Vec<(String, String)>,
}

proptest! {
    #[test]
    fn prop_valid_iff_no_errors(errors in pairs()) {
        let result = ValidationResult::fail(errors.clone());
        prop_assert_eq!(result.is_valid(), errors.is_empty());
        prop_assert_eq!(result.len(), errors.len());
    }

    #[test]
    fn prop_add_error_preserves_insertion_order(errors in pairs()) {
        let mut result = ValidationResult::new();
        for (field, message) in &errors {
            result.add_error(field.as_str(), message.as_str());
        }
        prop_assert_eq!(as_pairs(&result), errors);
    }

    #[test]
    fn prop_merge_concatenates(left in pairs(), right in pairs()) {
        let mut merged = ValidationResult::fail(left.clone());
        merged.merge(ValidationResult::fail(right.clone()));

        let expected: Vec<_> = left.into_iter().chain(right).collect();
        prop_assert_eq!(as_pairs(&merged), expected);
    }

    #[test]
    fn prop_sync_dispatch_is_schema_then_strategy(
        schema_errors in pairs(),
        strategy_errors in pairs(),
    ) {
        let mut builder = Schema::<Payload>::builder();
        for (field, message) in &schema_errors {
            let never = satisfies(|_: &bool| false, message.as_str());
            builder = builder.rule(field.as_str(), |p| &p.flag, never);
        }

        let mut registry = StrategyRegistry::new();
        registry
            .register_schema(builder.build())
            .register_strategy(|p: &Payload| ValidationResult::fail(p.strategy_errors.clone()));
        let validator = StrategyValidator::new(registry);

        let payload = Payload {
            flag: false,
            strategy_errors: strategy_errors.clone(),
        };
        let expected: Vec<_> = schema_errors.into_iter().chain(strategy_errors).collect();
        prop_assert_eq!(as_pairs(&validator.validate(&payload)), expected);
    }

    #[test]
    fn prop_display_lists_every_error(errors in pairs()) {
        let rendered = ValidationResult::fail(errors.clone()).to_string();
        if errors.is_empty() {
            prop_assert_eq!(rendered, "validation succeeded");
        } else {
            for (field, message) in &errors {
                let expected = format!("{}: {}", field, message);
                prop_assert!(rendered.contains(&expected));
            }
        }
    }
}
