//! Logger port backed by `tracing`.

use hexaframe_core::ports::{Fields, LoggerPort};
use tracing::{debug, error, info, warn};

/// Forwards port calls to the global `tracing` subscriber.
///
/// Fields are attached as a single JSON-encoded `fields` value, since
/// `tracing` field names must be known at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub const fn new() -> Self {
        Self
    }
}

fn render(fields: &Fields) -> String {
    if fields.is_empty() {
        return String::new();
    }
    serde_json::to_string(fields).unwrap_or_default()
}

impl LoggerPort for TracingLogger {
    fn debug(&self, message: &str, fields: &Fields) {
        debug!(fields = %render(fields), "{message}");
    }

    fn info(&self, message: &str, fields: &Fields) {
        info!(fields = %render(fields), "{message}");
    }

    fn warning(&self, message: &str, fields: &Fields) {
        warn!(fields = %render(fields), "{message}");
    }

    fn error(&self, message: &str, fields: &Fields) {
        error!(fields = %render(fields), "{message}");
    }
}
