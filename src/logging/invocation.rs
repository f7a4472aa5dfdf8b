//! Builds request and response records for one invocation.
//!
//! The [`InvocationLogger`] is shared by both instrumentation strategies.
//! It renders values through the conversion registry and hands finished
//! records to the sink. Rendering failures degrade the affected line to
//! the [`CONVERSION_FAILED`] marker (with a warning) instead of failing
//! the call: a broken log line must never replace a working business
//! result.

use super::constants::CONVERSION_FAILED;
use super::filter::should_log_parameter;
use super::record::{
    CallRecord, ParamEntry, ParamRecord, RequestRecord, ResponsePayload, ResponseRecord,
    StreamElementRecord,
};
use super::sink::CallSink;
use crate::convert::{ConversionFormat, ConversionRegistry};
use crate::correlation::CorrelationId;
use crate::invocation::{ArgValue, InvocationDescriptor, LogDirective};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Renders and emits the log records of an invocation.
#[derive(Clone)]
pub struct InvocationLogger {
    registry: Arc<ConversionRegistry>,
    sink: Arc<dyn CallSink>,
    format: ConversionFormat,
}

impl InvocationLogger {
    /// Logger rendering through `registry` and emitting into `sink`,
    /// using JSON as the rendering format.
    pub fn new(registry: Arc<ConversionRegistry>, sink: Arc<dyn CallSink>) -> Self {
        Self {
            registry,
            sink,
            format: ConversionFormat::Json,
        }
    }

    /// Use a different rendering format for every record.
    #[must_use = "This method returns a new InvocationLogger and does not modify self"]
    pub fn with_format(mut self, format: ConversionFormat) -> Self {
        self.format = format;
        self
    }

    /// Emit the combined request record of a synchronous call: method
    /// name plus a rendered `name=value` entry for every allowed ready
    /// parameter. Disallowed parameters are omitted entirely; pending
    /// parameters have no value yet and are skipped here.
    pub fn log_request(
        &self,
        id: CorrelationId,
        descriptor: &InvocationDescriptor,
        directive: &LogDirective,
    ) {
        let params = descriptor
            .params()
            .iter()
            .filter(|(name, _)| should_log_parameter(name, &directive.parameters))
            .filter_map(|(name, value)| match value {
                ArgValue::Ready(value) => Some(ParamEntry {
                    name: name.clone(),
                    value: self.render(value),
                }),
                ArgValue::Pending => None,
            })
            .collect();
        self.sink.emit(&CallRecord::Request(RequestRecord {
            correlation_id: id,
            method: descriptor.method().to_string(),
            params,
        }));
    }

    /// Emit the bare request record of an asynchronous call. Parameter
    /// values follow as standalone records, eagerly or at emission time.
    pub fn log_request_header(&self, id: CorrelationId, method: &str) {
        self.sink.emit(&CallRecord::Request(RequestRecord {
            correlation_id: id,
            method: method.to_string(),
            params: Vec::new(),
        }));
    }

    /// Emit a standalone parameter record for an already-decoded value.
    pub fn log_param(&self, id: CorrelationId, name: &str, value: &Value) {
        self.sink.emit(&CallRecord::Param(ParamRecord {
            correlation_id: id,
            name: name.to_string(),
            value: self.render(value),
        }));
    }

    /// Emit a standalone parameter record for a typed value produced by
    /// a wrapped pipeline.
    pub fn log_param_value<T: Serialize>(&self, id: CorrelationId, name: &str, value: &T) {
        self.sink.emit(&CallRecord::Param(ParamRecord {
            correlation_id: id,
            name: name.to_string(),
            value: self.render_typed(value),
        }));
    }

    /// Emit the response record for a produced result value.
    ///
    /// When `log_response` is false the value is not touched at all (no
    /// serialization takes place) and the record carries the ignored
    /// marker; the record itself always appears.
    pub fn log_response_value<T: Serialize>(
        &self,
        id: CorrelationId,
        method: &str,
        value: &T,
        log_response: bool,
    ) {
        let payload = if log_response {
            ResponsePayload::Value(self.render_typed(value))
        } else {
            ResponsePayload::Ignored
        };
        self.sink.emit(&CallRecord::Response(ResponseRecord {
            correlation_id: id,
            method: method.to_string(),
            payload,
        }));
    }

    /// Emit a response record carrying only the ignored marker. Used at
    /// wrap time for stream-shaped results with response logging
    /// disabled.
    pub fn log_ignored_response(&self, id: CorrelationId, method: &str) {
        self.sink.emit(&CallRecord::Response(ResponseRecord {
            correlation_id: id,
            method: method.to_string(),
            payload: ResponsePayload::Ignored,
        }));
    }

    /// Emit a record for one delivered element of a stream-shaped
    /// result.
    pub fn log_stream_element<T: Serialize>(&self, id: CorrelationId, method: &str, value: &T) {
        self.sink
            .emit(&CallRecord::StreamElement(StreamElementRecord {
                correlation_id: id,
                method: method.to_string(),
                element: self.render_typed(value),
            }));
    }

    /// Render a decoded value, degrading to the failure marker when the
    /// registry cannot render it.
    fn render(&self, value: &Value) -> Option<String> {
        match self.registry.convert(value, self.format) {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::warn!(error = %err, "failed to render value for log record");
                Some(CONVERSION_FAILED.to_string())
            }
        }
    }

    fn render_typed<T: Serialize>(&self, value: &T) -> Option<String> {
        match serde_json::to_value(value) {
            Ok(decoded) => self.render(&decoded),
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode value for log record");
                Some(CONVERSION_FAILED.to_string())
            }
        }
    }
}
