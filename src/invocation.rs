//! Invocation data model: what an intercepted call looks like to the
//! instrumentation engine.
//!
//! The interception boundary decodes each trapped call into an
//! [`InvocationDescriptor`] (method name plus named argument values) and a
//! [`LogDirective`] (what the call's configuration allows to be logged).
//! Both are immutable, created fresh per call, and discarded when the
//! call completes.

use crate::error::{InstrumentError, InstrumentResult};
use serde_json::Value;
use std::collections::HashSet;

/// A single argument value as seen by the instrumentation engine.
#[derive(Debug, Clone)]
pub enum ArgValue {
    /// Value known at call time, rendered into the request log.
    Ready(Value),
    /// Value produced later by an asynchronous pipeline. The boundary
    /// wraps the pipeline itself via
    /// [`AsyncInstrument::instrument_param`](crate::instrument::AsyncInstrument::instrument_param)
    /// and the value is logged at the moment it is emitted.
    Pending,
}

/// Immutable description of one intercepted call.
///
/// Parameter names and argument values are parallel sequences; the
/// constructor enforces that their lengths match.
#[derive(Debug, Clone)]
pub struct InvocationDescriptor {
    method: String,
    params: Vec<(String, ArgValue)>,
}

impl InvocationDescriptor {
    /// Build a descriptor from parallel name and value sequences.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::ArityMismatch`] when the sequences have
    /// different lengths.
    pub fn new(
        method: impl Into<String>,
        names: Vec<String>,
        values: Vec<ArgValue>,
    ) -> InstrumentResult<Self> {
        let method = method.into();
        if names.len() != values.len() {
            return Err(InstrumentError::ArityMismatch {
                method,
                parameters: names.len(),
                arguments: values.len(),
            });
        }
        Ok(Self {
            method,
            params: names.into_iter().zip(values).collect(),
        })
    }

    /// Build a descriptor from already-paired ready values.
    ///
    /// Convenience for synchronous calls, where every argument is known
    /// at call time.
    pub fn from_pairs(
        method: impl Into<String>,
        pairs: impl IntoIterator<Item = (impl Into<String>, Value)>,
    ) -> Self {
        Self {
            method: method.into(),
            params: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), ArgValue::Ready(value)))
                .collect(),
        }
    }

    /// Name of the intercepted method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Declared parameters, in call order.
    pub fn params(&self) -> &[(String, ArgValue)] {
        &self.params
    }
}

/// What a call's configuration allows the engine to log.
///
/// Decoded by the interception boundary from however the method was
/// tagged for instrumentation; the engine never inspects that metadata
/// itself.
#[derive(Debug, Clone)]
pub struct LogDirective {
    /// Parameter names allowed in request logs. Empty means every
    /// parameter is allowed.
    pub parameters: HashSet<String>,
    /// Whether the response value is rendered. When false the response
    /// record still appears, carrying an explicit ignored marker.
    pub log_response: bool,
}

impl LogDirective {
    /// Directive with the defaults of an untagged configuration: log
    /// every parameter and the response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict request logging to the given parameter names.
    #[must_use = "This method returns a new LogDirective and does not modify self"]
    pub fn with_parameters(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.parameters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add one parameter name to the allow-list.
    #[must_use = "This method returns a new LogDirective and does not modify self"]
    pub fn allow_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.insert(name.into());
        self
    }

    /// Set whether the response value is rendered.
    #[must_use = "This method returns a new LogDirective and does not modify self"]
    pub fn with_response_logging(mut self, enabled: bool) -> Self {
        self.log_response = enabled;
        self
    }
}

impl Default for LogDirective {
    fn default() -> Self {
        Self {
            parameters: HashSet::new(),
            log_response: true,
        }
    }
}
