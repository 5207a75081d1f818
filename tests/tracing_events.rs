//! Events emitted by registration and dispatch, captured through a `fmt` subscriber.

#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex};
use sluice::constraint::required;
use sluice::strategy::from_async_fn;
use sluice::{Schema, StrategyError, StrategyRegistry, StrategyValidator, ValidationResult};

#[derive(Debug, Clone, Default)]
struct Ticket {
    title: String,
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn subscriber(captured: &Captured) -> impl tracing::Subscriber + Send + Sync {
    let writer = captured.clone();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
}

#[test]
fn registration_and_replacement_are_logged() {
    let captured = Captured::default();

    tracing::subscriber::with_default(subscriber(&captured), || {
        let mut registry = StrategyRegistry::new();
        registry
            .register_schema(
                Schema::<Ticket>::builder()
                    .rule("Title", |t| &t.title, required())
                    .build(),
            )
            .register_strategy(|_: &Ticket| ValidationResult::new())
            .register_strategy(|_: &Ticket| ValidationResult::new());
    });

    let logs = captured.text();
    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("schema"));
    assert!(logs.contains("replaced registration"));
    assert!(logs.contains("Ticket"));
}

#[test]
fn async_fault_is_logged_inside_dispatch_span() {
    let captured = Captured::default();

    let mut registry = StrategyRegistry::new();
    registry.register_async_strategy(from_async_fn(|_: Ticket| async {
        Err::<ValidationResult, StrategyError>("tracker unavailable".into())
    }));
    let validator = StrategyValidator::new(registry);

    tracing::subscriber::with_default(subscriber(&captured), || {
        let outcome = tokio_test::block_on(validator.validate_async(&Ticket::default()));
        assert!(outcome.is_err());
    });

    let logs = captured.text();
    assert!(logs.contains("WARN"));
    assert!(logs.contains("validate_async"));
    assert!(logs.contains("async strategy did not complete"));
    assert!(logs.contains("tracker unavailable"));
}
