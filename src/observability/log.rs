use super::traits::Logger;
use tracing::warn;

/// Forwards warnings to `tracing`.
///
/// `detail` is logged as given; provider error text is scrubbed of secrets
/// where the error is built.
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn warn(&self, event: &str, correlation_id: &str, detail: &str) {
        warn!(chat_id = %correlation_id, detail = %detail, "{event}");
    }

    fn name(&self) -> &str {
        "log"
    }
}
