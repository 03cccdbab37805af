mod agents;
mod env_overrides;
mod gateway;
mod loader;
mod observability;
#[cfg(test)]
mod test_env;

pub use agents::{AgentsConfig, AnthropicConfig, CohereConfig, OpenAiConfig};
pub use gateway::GatewayConfig;
pub use loader::ConfigOrigin;
pub use observability::ObservabilityConfig;

use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".ai-answers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub agents: AgentsConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

pub(crate) fn default_app_dir() -> PathBuf {
    let home = UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
    home.join(APP_DIR_NAME)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: default_app_dir().join("config.toml"),
            gateway: GatewayConfig::default(),
            agents: AgentsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gateway.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.gateway.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "gateway.max_body_bytes must be greater than 0".into(),
            ));
        }
        self.agents.validate()
    }
}
