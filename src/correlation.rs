//! Correlation identifiers scoped to a single logical invocation.
//!
//! Every instrumented call is assigned one [`CorrelationId`] that appears
//! on every log record produced while the call is processed. The id is
//! carried two ways:
//!
//! - **Task-local binding**: [`scope`] / [`sync_scope`] bind the id for
//!   the duration of one logical chain of forwarding, so code inside the
//!   wrapped call can read it via [`current`]. The binding is released
//!   when the scope ends and never leaks into unrelated invocations.
//! - **Explicit value**: the instrumentation strategies capture the id
//!   by value into their emission-time taps, so records stay correct on
//!   whatever worker ends up polling an asynchronous pipeline. When the
//!   integrator hands work off to another execution context, re-entering
//!   [`scope`] with the same id is the integrator's responsibility.

use serde::{Deserialize, Serialize};

/// Length of the short correlation id format (first N characters).
const SHORT_ID_LENGTH: usize = 8;

tokio::task_local! {
    static CURRENT_CORRELATION: CorrelationId;
}

/// Opaque unique token correlating all log records of one invocation.
///
/// Uses UUID v7 so ids are unique across concurrent invocations and sort
/// by creation time in log output. The id has no structural relation to
/// any business identifier and is never reused across invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(uuid::Uuid);

impl CorrelationId {
    /// Generate a fresh correlation id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)))
    }

    /// Short form of the id (first characters), for compact log output.
    pub fn short(&self) -> String {
        let full = self.0.to_string();
        full.chars().take(SHORT_ID_LENGTH).collect()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

impl From<uuid::Uuid> for CorrelationId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

/// Run a future with `id` bound as the current correlation id.
///
/// The binding holds across every `.await` inside `future`, including
/// hand-offs between worker threads of a multi-threaded runtime, and is
/// released when the future completes.
pub async fn scope<F>(id: CorrelationId, future: F) -> F::Output
where
    F: std::future::Future,
{
    CURRENT_CORRELATION.scope(id, future).await
}

/// Run a closure with `id` bound as the current correlation id.
///
/// Synchronous counterpart of [`scope`], used by the blocking
/// instrumentation strategy.
pub fn sync_scope<T>(id: CorrelationId, f: impl FnOnce() -> T) -> T {
    CURRENT_CORRELATION.sync_scope(id, f)
}

/// Correlation id bound to the current logical invocation, if any.
pub fn current() -> Option<CorrelationId> {
    CURRENT_CORRELATION.try_with(|id| *id).ok()
}
