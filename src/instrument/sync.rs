//! Synchronous instrumentation strategy.
//!
//! Wraps a direct, blocking call: request record eagerly, forward, then
//! response record eagerly on success. A failure of the wrapped call
//! propagates unmodified and produces no response record.

use crate::correlation::{self, CorrelationId};
use crate::invocation::{InvocationDescriptor, LogDirective};
use crate::logging::InvocationLogger;
use serde::Serialize;

/// Wraps direct calls with request/response logging.
#[derive(Clone)]
pub struct SyncInstrument {
    logger: InvocationLogger,
}

impl SyncInstrument {
    /// Strategy emitting through the given logger.
    pub fn new(logger: InvocationLogger) -> Self {
        Self { logger }
    }

    /// Wrap one call.
    ///
    /// Binds a fresh correlation id for the duration of the forwarded
    /// call (readable inside via [`correlation::current`]), logs the
    /// request, forwards, and on success logs the response and returns
    /// the produced value untouched. A failure from `invoke` propagates
    /// exactly as raised; no response record is emitted for it.
    pub fn instrument<T, E, F>(
        &self,
        descriptor: &InvocationDescriptor,
        directive: &LogDirective,
        invoke: F,
    ) -> Result<T, E>
    where
        T: Serialize,
        F: FnOnce() -> Result<T, E>,
    {
        let id = CorrelationId::new();
        correlation::sync_scope(id, || {
            self.logger.log_request(id, descriptor, directive);
            let value = invoke()?;
            self.logger.log_response_value(
                id,
                descriptor.method(),
                &value,
                directive.log_response,
            );
            Ok(value)
        })
    }
}
