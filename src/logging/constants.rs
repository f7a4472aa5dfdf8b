//! Marker tokens used in log records.

/// Marker emitted in place of a response value when the call's directive
/// disables response logging.
///
/// The response record itself is always emitted; the marker proves the
/// method ran without revealing its result.
pub const IGNORED: &str = "<ignored>";

/// Marker emitted in place of a value that could not be rendered.
///
/// A failed rendering degrades the log line visibly rather than blanking
/// it; the business result of the call is never affected.
pub const CONVERSION_FAILED: &str = "<conversion failed>";

/// Text used when a rendered value is absent (null input).
pub const NULL_TEXT: &str = "null";
