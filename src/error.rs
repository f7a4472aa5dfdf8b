//! Error types for the instrumentation engine
//!
//! Wrapped-call failures are never represented here: the strategies are
//! generic over the caller's own error type and propagate it untouched.
//! This taxonomy only covers failures of the instrumentation machinery
//! itself (conversion, registry lookup, contract violations).

use crate::convert::ConversionFormat;
use thiserror::Error;

/// Errors raised by the instrumentation engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstrumentError {
    /// No converter is registered for the requested conversion format.
    ///
    /// This is a configuration error and is never silently worked around
    /// by falling back to another format.
    #[error("no converter registered for conversion format {0}")]
    MissingConverter(ConversionFormat),

    /// A converter failed to render a specific value.
    ///
    /// The underlying cause is preserved so it is never flattened into a
    /// blank log line.
    #[error("cannot render value as {format}: {source}")]
    Serialization {
        /// Format the value was being rendered as.
        format: ConversionFormat,
        /// Underlying serializer failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An asynchronous-mode call produced a result that is neither
    /// single- nor stream-shaped.
    ///
    /// The calling convention is a contract; a value outside it fails
    /// fast instead of being instrumented on a guess.
    #[error("asynchronous result of method '{0}' is neither single nor stream shaped")]
    IllegalResultShape(String),

    /// The declared parameter names and the supplied argument values of
    /// an invocation descriptor do not line up.
    #[error(
        "method '{method}' declares {parameters} parameters but received {arguments} arguments"
    )]
    ArityMismatch {
        /// Method the descriptor was built for.
        method: String,
        /// Number of declared parameter names.
        parameters: usize,
        /// Number of supplied argument values.
        arguments: usize,
    },
}

impl InstrumentError {
    /// Create a `Serialization` error wrapping the underlying cause.
    pub fn serialization(
        format: ConversionFormat,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            format,
            source: Box::new(source),
        }
    }
}

/// Result type alias for instrumentation operations.
pub type InstrumentResult<T> = Result<T, InstrumentError>;
