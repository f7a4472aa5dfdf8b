//! Pluggable value-to-text conversion for log rendering.
//!
//! Every value that appears in a log record is rendered through a
//! [`Converter`] looked up in the [`ConversionRegistry`] by its
//! [`ConversionFormat`]. The registry is the seam that lets logging
//! survive payload-shape evolution without touching the instrumentation
//! strategies: swapping the rendering of a format is a registration, not
//! a code change in the engine.
//!
//! Registration is expected at assembly time; lookup is concurrent and
//! read-mostly. Registering a converter for a format that already has
//! one replaces it (last registration wins).

mod json;
mod xml;

pub use json::JsonConverter;
pub use xml::XmlConverter;

use crate::error::{InstrumentError, InstrumentResult};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Identifies a registered rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ConversionFormat {
    /// JSON rendering (the default everywhere a format is optional).
    Json,
    /// XML rendering.
    Xml,
}

impl std::fmt::Display for ConversionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

/// Renders an arbitrary value as a format-specific string.
///
/// Implementations must be side-effect-free and must not mutate the
/// value they render. Null handling is the registry's job; `render` is
/// only ever called with non-null values.
pub trait Converter: Send + Sync {
    /// Format this converter renders.
    fn format(&self) -> ConversionFormat;

    /// Render `value` as text.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::Serialization`] when the value cannot
    /// be rendered in this format.
    fn render(&self, value: &Value) -> InstrumentResult<String>;
}

/// Concurrent registry mapping a format to its converter.
///
/// Lookup is safe from any number of invocations at once; mutation is
/// expected only at assembly time.
pub struct ConversionRegistry {
    converters: DashMap<ConversionFormat, Arc<dyn Converter>>,
}

impl ConversionRegistry {
    /// Empty registry with no converters.
    pub fn new() -> Self {
        Self {
            converters: DashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in JSON and XML converters.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(JsonConverter));
        registry.register(Arc::new(XmlConverter));
        registry
    }

    /// Register a converter under its own format.
    ///
    /// A converter already registered for the same format is replaced:
    /// last registration wins.
    pub fn register(&self, converter: Arc<dyn Converter>) {
        self.converters.insert(converter.format(), converter);
    }

    /// Render `value` in the given format.
    ///
    /// Returns `Ok(None)` for a null value, the sentinel for "nothing to
    /// render".
    ///
    /// # Errors
    ///
    /// [`InstrumentError::MissingConverter`] when no converter is
    /// registered for `format`; [`InstrumentError::Serialization`] when
    /// the converter itself fails.
    pub fn convert(
        &self,
        value: &Value,
        format: ConversionFormat,
    ) -> InstrumentResult<Option<String>> {
        if value.is_null() {
            return Ok(None);
        }
        let converter = self
            .converters
            .get(&format)
            .ok_or(InstrumentError::MissingConverter(format))?;
        converter.render(value).map(Some)
    }

    /// Render `value` as JSON, the default format.
    ///
    /// # Errors
    ///
    /// Same as [`ConversionRegistry::convert`].
    pub fn convert_default(&self, value: &Value) -> InstrumentResult<Option<String>> {
        self.convert(value, ConversionFormat::Json)
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_null_is_sentinel() {
        let registry = ConversionRegistry::with_defaults();
        assert_eq!(registry.convert_default(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_missing_converter_is_an_error() {
        let registry = ConversionRegistry::new();
        let result = registry.convert(&json!(1), ConversionFormat::Json);
        assert!(matches!(
            result,
            Err(InstrumentError::MissingConverter(ConversionFormat::Json))
        ));
    }

    #[test]
    fn test_last_registration_wins() {
        struct FixedConverter;

        impl Converter for FixedConverter {
            fn format(&self) -> ConversionFormat {
                ConversionFormat::Json
            }

            fn render(&self, _value: &Value) -> InstrumentResult<String> {
                Ok("fixed".to_string())
            }
        }

        let registry = ConversionRegistry::with_defaults();
        registry.register(Arc::new(FixedConverter));
        assert_eq!(
            registry.convert_default(&json!({"a": 1})).unwrap(),
            Some("fixed".to_string())
        );
    }

    #[test]
    fn test_default_format_is_json() {
        let registry = ConversionRegistry::with_defaults();
        assert_eq!(
            registry.convert_default(&json!("Test")).unwrap(),
            Some("\"Test\"".to_string())
        );
    }
}
