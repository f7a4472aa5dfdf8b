//! Structured log records handed to sinks.
//!
//! Records carry already-rendered values (the conversion registry runs
//! before the sink sees anything), so a sink only formats and emits. A
//! rendered value of `None` means the underlying value was null.

use super::constants::{IGNORED, NULL_TEXT};
use crate::correlation::CorrelationId;
use serde::Serialize;

/// One rendered `name=value` pair of a request record.
#[derive(Debug, Clone, Serialize)]
pub struct ParamEntry {
    /// Parameter name.
    pub name: String,
    /// Rendered value, `None` when the value was null.
    pub value: Option<String>,
}

impl ParamEntry {
    /// Rendered text of the value, with the null sentinel spelled out.
    pub fn value_text(&self) -> &str {
        self.value.as_deref().unwrap_or(NULL_TEXT)
    }
}

/// Request record: one per invocation, emitted before the call runs.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    /// Correlation id of the invocation.
    pub correlation_id: CorrelationId,
    /// Name of the intercepted method.
    pub method: String,
    /// Rendered values of the allowed parameters, in call order.
    /// Parameters outside the allow-list are absent, not masked.
    pub params: Vec<ParamEntry>,
}

/// What a response record carries in place of the call's result.
#[derive(Debug, Clone, Serialize)]
pub enum ResponsePayload {
    /// Rendered result value (`None` when the result was null).
    Value(Option<String>),
    /// The directive disabled response logging; the record still appears
    /// with this explicit marker.
    Ignored,
}

/// Response record: emitted once per successful synchronous return or
/// per produced single-shaped value. Never emitted on failure.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    /// Correlation id of the invocation.
    pub correlation_id: CorrelationId,
    /// Name of the intercepted method.
    pub method: String,
    /// Rendered result or the ignored marker.
    pub payload: ResponsePayload,
}

impl ResponseRecord {
    /// Rendered text of the payload, with markers and the null sentinel
    /// spelled out.
    pub fn payload_text(&self) -> &str {
        match &self.payload {
            ResponsePayload::Value(Some(text)) => text,
            ResponsePayload::Value(None) => NULL_TEXT,
            ResponsePayload::Ignored => IGNORED,
        }
    }
}

/// One element of a stream-shaped result, emitted per delivery in
/// emission order. Stream results produce these instead of a terminal
/// response record.
#[derive(Debug, Clone, Serialize)]
pub struct StreamElementRecord {
    /// Correlation id of the invocation.
    pub correlation_id: CorrelationId,
    /// Name of the intercepted method.
    pub method: String,
    /// Rendered element value.
    pub element: Option<String>,
}

/// A single parameter value logged on its own line, used by the
/// asynchronous request path: eagerly for ready values, at emission time
/// for single-shaped pipeline parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ParamRecord {
    /// Correlation id of the invocation.
    pub correlation_id: CorrelationId,
    /// Parameter name.
    pub name: String,
    /// Rendered value, `None` when the value was null.
    pub value: Option<String>,
}

/// Any record the engine can emit.
#[derive(Debug, Clone, Serialize)]
pub enum CallRecord {
    /// Request record.
    Request(RequestRecord),
    /// Response record.
    Response(ResponseRecord),
    /// Stream element record.
    StreamElement(StreamElementRecord),
    /// Standalone parameter record.
    Param(ParamRecord),
}

impl CallRecord {
    /// Correlation id carried by the record.
    pub fn correlation_id(&self) -> CorrelationId {
        match self {
            Self::Request(r) => r.correlation_id,
            Self::Response(r) => r.correlation_id,
            Self::StreamElement(r) => r.correlation_id,
            Self::Param(r) => r.correlation_id,
        }
    }
}
