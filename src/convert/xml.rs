//! XML converter.
//!
//! Renders JSON-shaped values as a rootless element sequence: object
//! entries become `<key>...</key>` elements, array items become
//! `<item>...</item>` elements, scalars become escaped text. Null
//! entries are omitted entirely, matching the non-empty inclusion policy
//! of the original XML mapping.

use super::{ConversionFormat, Converter};
use crate::error::InstrumentResult;
use serde_json::Value;

/// Renders values as element-per-field XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlConverter;

impl Converter for XmlConverter {
    fn format(&self) -> ConversionFormat {
        ConversionFormat::Xml
    }

    fn render(&self, value: &Value) -> InstrumentResult<String> {
        let mut out = String::new();
        write_value(&mut out, value);
        Ok(out)
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            for item in items {
                if item.is_null() {
                    continue;
                }
                out.push_str("<item>");
                write_value(out, item);
                out.push_str("</item>");
            }
        }
        Value::Object(map) => {
            for (key, entry) in map {
                if entry.is_null() {
                    continue;
                }
                out.push('<');
                out.push_str(key);
                out.push('>');
                write_value(out, entry);
                out.push_str("</");
                out.push_str(key);
                out.push('>');
            }
        }
    }
}

fn write_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}
