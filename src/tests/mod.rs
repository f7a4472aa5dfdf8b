//! Test module for callwrap
//!
//! Cross-module suites covering the instrumentation strategies, the
//! correlation context, and the logging pipeline, including
//! property-based tests using proptest.


#[cfg(test)]
pub mod logging_tests;
