//! The two instrumentation strategies.
//!
//! Both consume the same inputs — an
//! [`InvocationDescriptor`](crate::invocation::InvocationDescriptor), a
//! [`LogDirective`](crate::invocation::LogDirective), and a way to
//! forward the call — and differ only in execution model:
//!
//! - [`SyncInstrument`] wraps a direct call: log request, forward, log
//!   response, all eagerly.
//! - [`AsyncInstrument`] wraps lazily-subscribed pipelines: the request
//!   is logged eagerly at wrap time, values only when they are actually
//!   delivered.
//!
//! Neither strategy ever alters the values, cardinality, timing, or
//! failure behavior of the wrapped computation, and a wrapped-call
//! failure is propagated exactly as raised (with no response record —
//! the one documented asymmetry of the design).

mod stream;
mod sync;

pub use stream::{AsyncInstrument, AsyncResultShape, InstrumentedResult};
pub use sync::SyncInstrument;
