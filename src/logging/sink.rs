//! Abstract emission sink and the tracing-backed default.

use super::record::{CallRecord, ParamEntry};
use std::fmt::Write as _;

/// An abstract sink accepting finished log records.
///
/// Emission must be synchronous and non-blocking: sinks run inside the
/// taps attached to wrapped pipelines and must never delay, reorder, or
/// buffer the pipeline's own items. Transport, retention, and level
/// configuration are the integrator's concern.
pub trait CallSink: Send + Sync {
    /// Emit one record.
    fn emit(&self, record: &CallRecord);
}

/// Default sink emitting structured `tracing` events at debug severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl CallSink for TracingSink {
    fn emit(&self, record: &CallRecord) {
        match record {
            CallRecord::Request(r) => {
                tracing::debug!(
                    correlation_id = %r.correlation_id,
                    method = %r.method,
                    params = %format_params(&r.params),
                    "call requested"
                );
            }
            CallRecord::Response(r) => {
                tracing::debug!(
                    correlation_id = %r.correlation_id,
                    method = %r.method,
                    response = %r.payload_text(),
                    "call responded"
                );
            }
            CallRecord::StreamElement(r) => {
                tracing::debug!(
                    correlation_id = %r.correlation_id,
                    method = %r.method,
                    element = %r.element.as_deref().unwrap_or(super::constants::NULL_TEXT),
                    "next stream element"
                );
            }
            CallRecord::Param(r) => {
                tracing::debug!(
                    correlation_id = %r.correlation_id,
                    parameter = %r.name,
                    value = %r.value.as_deref().unwrap_or(super::constants::NULL_TEXT),
                    "call parameter"
                );
            }
        }
    }
}

fn format_params(params: &[ParamEntry]) -> String {
    let mut out = String::new();
    for entry in params {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{}={}", entry.name, entry.value_text());
    }
    out
}

// =============================================================================
// MemorySink (for testing)
// =============================================================================

#[cfg(test)]
use std::sync::{Arc, Mutex};

/// A sink that captures records in memory for test assertions.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CallRecord>>>,
}

#[cfg(test)]
impl MemorySink {
    /// Creates a new empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured records, in emission order.
    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Captured request records.
    pub fn requests(&self) -> Vec<super::record::RequestRecord> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                CallRecord::Request(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    /// Captured response records.
    pub fn responses(&self) -> Vec<super::record::ResponseRecord> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                CallRecord::Response(resp) => Some(resp),
                _ => None,
            })
            .collect()
    }

    /// Captured stream element records.
    pub fn elements(&self) -> Vec<super::record::StreamElementRecord> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                CallRecord::StreamElement(el) => Some(el),
                _ => None,
            })
            .collect()
    }

    /// Captured standalone parameter records.
    pub fn params(&self) -> Vec<super::record::ParamRecord> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                CallRecord::Param(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// True if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
impl CallSink for MemorySink {
    fn emit(&self, record: &CallRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}
