use super::traits::Logger;

/// Discards every warning.
pub struct NoopLogger;

impl Logger for NoopLogger {
    #[inline(always)]
    fn warn(&self, _event: &str, _correlation_id: &str, _detail: &str) {}

    fn name(&self) -> &str {
        "noop"
    }
}
