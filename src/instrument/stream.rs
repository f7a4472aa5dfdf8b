//! Asynchronous instrumentation strategy.
//!
//! Wraps calls whose results are lazily-subscribed pipelines: a future
//! producing one eventual value (single-shaped) or a stream producing
//! zero or more values over time (stream-shaped). The request is logged
//! once, eagerly, at wrap time; values are logged only when they are
//! actually delivered downstream, through non-mutating `inspect` taps
//! that never change items, ordering, completion, failure, or
//! cancellation behavior. Attaching instrumentation does not poll the
//! pipeline.
//!
//! The correlation id is captured by value into every tap, so records
//! stay correct on whatever worker polls the pipeline. Binding the id
//! into the task-local scope around the forwarded call (via
//! [`correlation::scope`](crate::correlation::scope)) is the
//! integrator's responsibility when the wrapped code wants to read it.

use crate::correlation::CorrelationId;
use crate::error::{InstrumentError, InstrumentResult};
use crate::invocation::{ArgValue, InvocationDescriptor, LogDirective};
use crate::logging::{InvocationLogger, should_log_parameter};
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{Future, FutureExt, Stream, StreamExt};
use serde::Serialize;

/// Shape of an asynchronous call result, classified by the interception
/// boundary.
pub enum AsyncResultShape<T, E> {
    /// Completes with one value, fails, or never completes.
    Single(BoxFuture<'static, Result<T, E>>),
    /// Emits zero or more values over time, then completes, fails, or
    /// is cancelled. A failed item terminates the pipeline.
    Stream(BoxStream<'static, Result<T, E>>),
    /// A value produced synchronously. Not a legal shape for the
    /// asynchronous strategy; instrumenting it fails fast.
    Eager(T),
}

impl<T, E> AsyncResultShape<T, E> {
    /// Classify a future as a single-shaped result.
    pub fn single<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::Single(future.boxed())
    }

    /// Classify a stream as a stream-shaped result.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<T, E>> + Send + 'static,
    {
        Self::Stream(stream.boxed())
    }
}

/// An instrumented asynchronous result, same shape as the input.
pub enum InstrumentedResult<T, E> {
    /// Instrumented single-shaped pipeline.
    Single(BoxFuture<'static, Result<T, E>>),
    /// Instrumented stream-shaped pipeline.
    Stream(BoxStream<'static, Result<T, E>>),
}

impl<T, E> InstrumentedResult<T, E> {
    /// The wrapped future, if the result was single-shaped.
    pub fn into_single(self) -> Option<BoxFuture<'static, Result<T, E>>> {
        match self {
            Self::Single(future) => Some(future),
            Self::Stream(_) => None,
        }
    }

    /// The wrapped stream, if the result was stream-shaped.
    pub fn into_stream(self) -> Option<BoxStream<'static, Result<T, E>>> {
        match self {
            Self::Single(_) => None,
            Self::Stream(stream) => Some(stream),
        }
    }
}

/// Wraps asynchronous calls with request/response logging.
#[derive(Clone)]
pub struct AsyncInstrument {
    logger: InvocationLogger,
}

impl AsyncInstrument {
    /// Strategy emitting through the given logger.
    pub fn new(logger: InvocationLogger) -> Self {
        Self { logger }
    }

    /// Begin instrumenting one call: emit the request record and a
    /// parameter record for every allowed ready parameter, before any
    /// pipeline is subscribed. Returns the invocation's correlation id,
    /// which the boundary threads through the per-parameter and result
    /// wrappers.
    pub fn begin(
        &self,
        descriptor: &InvocationDescriptor,
        directive: &LogDirective,
    ) -> CorrelationId {
        let id = CorrelationId::new();
        self.logger.log_request_header(id, descriptor.method());
        for (name, value) in descriptor.params() {
            if !should_log_parameter(name, &directive.parameters) {
                continue;
            }
            if let ArgValue::Ready(value) = value {
                self.logger.log_param(id, name, value);
            }
        }
        id
    }

    /// Tap a single-shaped parameter so its value is logged at the
    /// moment it is produced.
    ///
    /// The tap neither delays nor duplicates delivery; a parameter
    /// outside the allow-list passes through with no tap at all. Nothing
    /// is logged when the parameter pipeline fails or is cancelled.
    pub fn instrument_param<T, E, F>(
        &self,
        id: CorrelationId,
        name: &str,
        directive: &LogDirective,
        param: F,
    ) -> BoxFuture<'static, Result<T, E>>
    where
        T: Serialize + Send + 'static,
        E: Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        if !should_log_parameter(name, &directive.parameters) {
            return param.boxed();
        }
        let logger = self.logger.clone();
        let name = name.to_string();
        param
            .inspect(move |produced| {
                if let Ok(value) = produced {
                    logger.log_param_value(id, &name, value);
                }
            })
            .boxed()
    }

    /// Pass a stream-shaped parameter through unchanged.
    ///
    /// Multi-valued parameter instrumentation is intentionally not
    /// implemented; this is a pass-through placeholder, kept explicit so
    /// the gap is visible at the call site rather than guessed around.
    pub fn instrument_stream_param<S>(&self, param: S) -> S
    where
        S: Stream,
    {
        param
    }

    /// Instrument the call's result pipeline according to its shape.
    ///
    /// - Single: a tap fires once when the value is produced, emitting a
    ///   response record (rendered value, or the ignored marker when the
    ///   directive disables response logging). Nothing is emitted on
    ///   failure or cancellation.
    /// - Stream with response logging: a tap emits one "next element"
    ///   record per delivered element, in emission order; there is no
    ///   terminal response record.
    /// - Stream without response logging: exactly one ignored-marker
    ///   response record at wrap time, and no tap is attached.
    ///
    /// # Errors
    ///
    /// [`InstrumentError::IllegalResultShape`] for an eager value.
    pub fn instrument_result<T, E>(
        &self,
        id: CorrelationId,
        method: &str,
        directive: &LogDirective,
        result: AsyncResultShape<T, E>,
    ) -> InstrumentResult<InstrumentedResult<T, E>>
    where
        T: Serialize + Send + 'static,
        E: Send + 'static,
    {
        match result {
            AsyncResultShape::Single(future) => {
                let logger = self.logger.clone();
                let method = method.to_string();
                let log_response = directive.log_response;
                Ok(InstrumentedResult::Single(
                    future
                        .inspect(move |produced| {
                            if let Ok(value) = produced {
                                logger.log_response_value(id, &method, value, log_response);
                            }
                        })
                        .boxed(),
                ))
            }
            AsyncResultShape::Stream(stream) => {
                if directive.log_response {
                    let logger = self.logger.clone();
                    let method = method.to_string();
                    Ok(InstrumentedResult::Stream(
                        stream
                            .inspect(move |emitted| {
                                if let Ok(element) = emitted {
                                    logger.log_stream_element(id, &method, element);
                                }
                            })
                            .boxed(),
                    ))
                } else {
                    self.logger.log_ignored_response(id, method);
                    Ok(InstrumentedResult::Stream(stream))
                }
            }
            AsyncResultShape::Eager(_) => {
                Err(InstrumentError::IllegalResultShape(method.to_string()))
            }
        }
    }
}
