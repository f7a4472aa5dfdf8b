//! Tests of the logging pipeline: filter properties, record building,
//! and degraded rendering.

use crate::convert::{ConversionFormat, ConversionRegistry, Converter};
use crate::error::{InstrumentError, InstrumentResult};
use crate::logging::{
    CONVERSION_FAILED, InvocationLogger, MemorySink, should_log_parameter,
};
use crate::{InvocationDescriptor, LogDirective, SyncInstrument};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;

/// Converter that fails on every value.
struct FailingConverter;

impl Converter for FailingConverter {
    fn format(&self) -> ConversionFormat {
        ConversionFormat::Json
    }

    fn render(&self, _value: &Value) -> InstrumentResult<String> {
        Err(InstrumentError::serialization(
            ConversionFormat::Json,
            serde_json::from_str::<Value>("").unwrap_err(),
        ))
    }
}

fn setup_with_registry(registry: ConversionRegistry) -> (SyncInstrument, MemorySink) {
    let sink = MemorySink::new();
    let logger = InvocationLogger::new(Arc::new(registry), Arc::new(sink.clone()));
    (SyncInstrument::new(logger), sink)
}

#[test]
fn test_failed_rendering_degrades_the_record_not_the_call() {
    let registry = ConversionRegistry::new();
    registry.register(Arc::new(FailingConverter));
    let (instrument, sink) = setup_with_registry(registry);

    let descriptor = InvocationDescriptor::from_pairs("lookup", [("id", json!(1))]);
    let result = instrument.instrument(&descriptor, &LogDirective::new(), || {
        Ok::<_, Infallible>(json!({"id": 1}))
    });

    // The business result is intact.
    assert_eq!(result.unwrap(), json!({"id": 1}));

    // Both records carry the explicit failure marker, never a blank.
    let requests = sink.requests();
    assert_eq!(
        requests[0].params[0].value.as_deref(),
        Some(CONVERSION_FAILED)
    );
    assert_eq!(sink.responses()[0].payload_text(), CONVERSION_FAILED);
}

#[test]
fn test_missing_converter_degrades_the_record() {
    let (instrument, sink) = setup_with_registry(ConversionRegistry::new());

    let descriptor = InvocationDescriptor::from_pairs("lookup", [("id", json!(1))]);
    instrument
        .instrument(&descriptor, &LogDirective::new(), || {
            Ok::<_, Infallible>(json!(1))
        })
        .unwrap();

    assert_eq!(
        sink.requests()[0].params[0].value.as_deref(),
        Some(CONVERSION_FAILED)
    );
}

#[test]
fn test_logger_renders_in_configured_format() {
    let registry = Arc::new(ConversionRegistry::with_defaults());
    let sink = MemorySink::new();
    let logger = InvocationLogger::new(registry, Arc::new(sink.clone()))
        .with_format(ConversionFormat::Xml);
    let instrument = SyncInstrument::new(logger);

    let descriptor =
        InvocationDescriptor::from_pairs("lookup", [("request", json!({"name": "Igor"}))]);
    instrument
        .instrument(&descriptor, &LogDirective::new(), || {
            Ok::<_, Infallible>(json!({"id": 1}))
        })
        .unwrap();

    assert_eq!(
        sink.requests()[0].params[0].value.as_deref(),
        Some("<name>Igor</name>")
    );
    assert_eq!(sink.responses()[0].payload_text(), "<id>1</id>");
}

#[test]
fn test_null_parameter_renders_null_sentinel() {
    let (instrument, sink) = setup_with_registry(ConversionRegistry::with_defaults());

    let descriptor = InvocationDescriptor::from_pairs("lookup", [("filter", Value::Null)]);
    instrument
        .instrument(&descriptor, &LogDirective::new(), || {
            Ok::<_, Infallible>(json!(1))
        })
        .unwrap();

    let request = &sink.requests()[0];
    assert_eq!(request.params[0].value, None);
    assert_eq!(request.params[0].value_text(), "null");
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    /// Property: an empty allow-list permits every parameter name.
    #[test]
    fn prop_empty_allow_list_permits_all(name in "[a-zA-Z0-9_]{1,16}") {
        prop_assert!(should_log_parameter(&name, &HashSet::new()));
    }

    /// Property: a non-empty allow-list permits exactly its members.
    #[test]
    fn prop_allow_list_is_exact_membership(
        allowed in prop::collection::hash_set("[a-z]{1,8}", 1..5),
        candidate in "[a-z]{1,8}",
    ) {
        let list: HashSet<String> = allowed.iter().cloned().collect();
        prop_assert_eq!(
            should_log_parameter(&candidate, &list),
            allowed.contains(&candidate)
        );
    }

    /// Property: the request record contains exactly the allowed
    /// parameters, in declaration order, and no others.
    #[test]
    fn prop_request_record_contains_exactly_the_allowed_parameters(
        names in prop::collection::hash_set("[a-z]{1,6}", 1..8),
        mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let allowed: HashSet<String> = names
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name.clone())
            .collect();

        let (instrument, sink) = setup_with_registry(ConversionRegistry::with_defaults());
        let descriptor = InvocationDescriptor::from_pairs(
            "generated",
            names.iter().map(|name| (name.clone(), json!(1))),
        );
        let directive = LogDirective {
            parameters: allowed.clone(),
            log_response: true,
        };
        instrument
            .instrument(&descriptor, &directive, || Ok::<_, Infallible>(json!(1)))
            .unwrap();

        let expected: Vec<String> = if allowed.is_empty() {
            names.clone()
        } else {
            names
                .iter()
                .filter(|name| allowed.contains(*name))
                .cloned()
                .collect()
        };
        let logged: Vec<String> = sink.requests()[0]
            .params
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        prop_assert_eq!(logged, expected);
    }
}
