/// Warning sink for recovered agent anomalies.
///
/// Calls are fire-and-forget and must never fail or block the caller.
pub trait Logger: Send + Sync {
    fn warn(&self, event: &str, correlation_id: &str, detail: &str);

    fn name(&self) -> &str;
}
