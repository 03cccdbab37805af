use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// "log" | "none"
    pub backend: String,
    /// Max level for the fmt subscriber: "error" | "warn" | "info" | "debug" | "trace"
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: "log".into(),
            log_level: "info".into(),
        }
    }
}
