pub mod log;
pub mod noop;
pub mod traits;

pub use self::log::TracingLogger;
pub use noop::NoopLogger;
pub use traits::Logger;

use crate::config::ObservabilityConfig;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Factory: create the right logger from config
pub fn create_logger(config: &ObservabilityConfig) -> Arc<dyn Logger> {
    match config.backend.as_str() {
        "log" => Arc::new(TracingLogger::new()),
        "none" | "noop" => Arc::new(NoopLogger),
        _ => {
            tracing::warn!(
                "Unknown observability backend '{}', falling back to log",
                config.backend
            );
            Arc::new(TracingLogger::new())
        }
    }
}

/// Parse a level name, defaulting to `INFO` for anything unrecognised.
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::INFO)
}

/// Install the process-wide fmt subscriber.
pub fn init_tracing(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&config.log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {e}"))
}
