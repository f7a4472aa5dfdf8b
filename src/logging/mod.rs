//! Request/response log construction.
//!
//! This module builds the structured records the instrumentation
//! strategies emit and decides what goes into them:
//!
//! - **filter**: the allow-list parameter filter (empty list = log all,
//!   otherwise exact-match membership)
//! - **record**: the record types handed to sinks, values already
//!   rendered
//! - **sink**: the abstract [`CallSink`] plus the tracing-backed default
//! - **invocation**: the [`InvocationLogger`] shared by both strategies
//! - **constants**: the `<ignored>` and `<conversion failed>` markers
//!
//! Emission happens at debug severity and is best-effort: records are
//! built and handed to the sink synchronously, and a record that cannot
//! be rendered degrades visibly instead of disappearing.

mod constants;
mod filter;
mod invocation;
mod record;
mod sink;

pub use constants::{CONVERSION_FAILED, IGNORED, NULL_TEXT};
pub use filter::should_log_parameter;
pub use invocation::InvocationLogger;
pub use record::{
    CallRecord, ParamEntry, ParamRecord, RequestRecord, ResponsePayload, ResponseRecord,
    StreamElementRecord,
};
pub use sink::{CallSink, TracingSink};

// Test utilities (only exported in test builds)
#[cfg(test)]
pub use sink::MemorySink;
