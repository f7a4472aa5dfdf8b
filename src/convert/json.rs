//! JSON converter backed by serde_json.

use super::{ConversionFormat, Converter};
use crate::error::{InstrumentError, InstrumentResult};
use serde_json::Value;

/// Renders values as compact JSON.
///
/// Scalars keep their standard JSON text form: strings are quoted,
/// numbers and booleans are bare.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl Converter for JsonConverter {
    fn format(&self) -> ConversionFormat {
        ConversionFormat::Json
    }

    fn render(&self, value: &Value) -> InstrumentResult<String> {
        serde_json::to_string(value)
            .map_err(|err| InstrumentError::serialization(ConversionFormat::Json, err))
    }
}
