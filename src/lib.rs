#![warn(missing_docs)]
//! # callwrap
//!
//! Cross-cutting instrumentation for wrapped method calls: structured
//! request/response logging correlated by a per-invocation id, with
//! selective parameter redaction-by-omission and pluggable value
//! rendering. Works across two execution models — direct blocking calls
//! and lazily-subscribed asynchronous pipelines — without altering the
//! semantics, cardinality, or timing of the wrapped computation.
//!
//! ## Overview
//!
//! The engine does not intercept anything itself. An interception
//! boundary (a proxy layer, a middleware chain, generated glue — the
//! engine does not care) decodes each trapped call into:
//!
//! - an [`InvocationDescriptor`]: method name plus named argument values
//! - a [`LogDirective`]: the call's allow-list and response-logging flag
//! - a forwarding function that actually runs the call
//!
//! and hands them to one of two strategies:
//!
//! - [`SyncInstrument`] for direct calls: request record, forward,
//!   response record, all eagerly.
//! - [`AsyncInstrument`] for calls returning a future or stream: the
//!   request record is emitted eagerly at wrap time, and values are
//!   logged only when the pipeline actually delivers them, through
//!   non-mutating taps.
//!
//! Every record of one invocation carries the same [`CorrelationId`].
//! Values are rendered through the [`ConversionRegistry`]
//! (JSON by default, XML built in, further formats pluggable) and
//! emitted into an abstract [`CallSink`]; the default sink logs
//! structured `tracing` events at debug severity.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use callwrap::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ConversionRegistry::with_defaults());
//! let logger = InvocationLogger::new(registry, Arc::new(TracingSink));
//! let instrument = SyncInstrument::new(logger);
//!
//! let descriptor = InvocationDescriptor::from_pairs(
//!     "employee_service.create",
//!     [("request", serde_json::json!({"name": "Igor", "salary": 10000}))],
//! );
//! let directive = LogDirective::new();
//!
//! let created: Result<Employee, ServiceError> =
//!     instrument.instrument(&descriptor, &directive, || {
//!         employee_service.create(request)
//!     });
//! ```
//!
//! Wrapping an asynchronous call:
//!
//! ```rust,ignore
//! let instrument = AsyncInstrument::new(logger);
//! let id = instrument.begin(&descriptor, &directive);
//!
//! let shape = AsyncResultShape::stream(employee_service.watch(filter));
//! let wrapped = instrument
//!     .instrument_result(id, descriptor.method(), &directive, shape)?
//!     .into_stream()
//!     .unwrap();
//! // Each element is logged when, and only when, a subscriber pulls it.
//! ```
//!
//! ## Guarantees
//!
//! - The wrapped value handed back to the caller is exactly what the
//!   wrapped call produced; logging never transforms it.
//! - A wrapped-call failure propagates exactly as raised. No response
//!   record is emitted for a failed call — a deliberate, documented
//!   asymmetry.
//! - Request records happen-before every response or element record of
//!   the same invocation; stream element records preserve emission
//!   order.
//! - Taps are side-effecting observers only: they never poll a cold
//!   pipeline, never duplicate or delay items, and vanish with the
//!   pipeline on cancellation.
//! - A rendering failure degrades the affected record to an explicit
//!   marker; it never turns a successful call into a failed one.
//!
//! ## Module Structure
//!
//! - invocation model — [`InvocationDescriptor`], [`ArgValue`],
//!   [`LogDirective`]
//! - [`correlation`] — [`CorrelationId`] plus task-local scoping
//! - [`convert`] — [`ConversionRegistry`], [`Converter`], built-in
//!   JSON/XML converters
//! - [`logging`] — records, [`CallSink`], [`InvocationLogger`],
//!   allow-list filter
//! - [`instrument`] — the two strategies
//! - [`rate_limit`] — a sibling utility: fixed quota of runs per time
//!   window

pub mod convert;
pub mod correlation;
mod error;
mod invocation;
pub mod instrument;
pub mod logging;
pub mod rate_limit;

#[cfg(test)]
mod tests;

// Public API
pub use convert::{ConversionFormat, ConversionRegistry, Converter, JsonConverter, XmlConverter};
pub use correlation::CorrelationId;
pub use error::{InstrumentError, InstrumentResult};
pub use instrument::{AsyncInstrument, AsyncResultShape, InstrumentedResult, SyncInstrument};
pub use invocation::{ArgValue, InvocationDescriptor, LogDirective};
pub use logging::{
    CallRecord, CallSink, IGNORED, InvocationLogger, ParamEntry, ParamRecord, RequestRecord,
    ResponsePayload, ResponseRecord, StreamElementRecord, TracingSink, should_log_parameter,
};
pub use rate_limit::RateLimiter;

/// Prelude for convenient imports
///
/// Import everything you need with a single use statement:
///
/// ```rust,ignore
/// use callwrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ArgValue, AsyncInstrument, AsyncResultShape, CallRecord, CallSink, ConversionFormat,
        ConversionRegistry, Converter, CorrelationId, InstrumentError, InstrumentResult,
        InstrumentedResult, InvocationDescriptor, InvocationLogger, LogDirective, RateLimiter,
        SyncInstrument, TracingSink,
    };
}
