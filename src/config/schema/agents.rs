use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub openai: OpenAiConfig,
    pub anthropic: AnthropicConfig,
    pub cohere: CohereConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub enabled: bool,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o".into(),
            temperature: 0.5,
            max_tokens: 1024,
            timeout_ms: 60_000,
            base_url: "https://api.openai.com/v1".into(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub enabled: bool,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub base_url: String,
    /// Value for the `anthropic-beta` header, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "claude-3-5-sonnet-20241022".into(),
            temperature: 0.5,
            max_tokens: 1024,
            timeout_ms: 60_000,
            base_url: "https://api.anthropic.com".into(),
            beta: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohereConfig {
    pub enabled: bool,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "command-r-plus".into(),
            temperature: 0.5,
            max_tokens: 1024,
            timeout_ms: 60_000,
            base_url: "https://api.cohere.ai".into(),
            api_key: None,
        }
    }
}

fn validate_model(
    agent: &str,
    temperature: f64,
    max_tokens: u32,
    timeout_ms: u64,
) -> Result<(), ConfigError> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ConfigError::Validation(format!(
            "agents.{agent}.temperature must be within 0.0..=2.0 (got {temperature})"
        )));
    }
    if max_tokens == 0 {
        return Err(ConfigError::Validation(format!(
            "agents.{agent}.max_tokens must be greater than 0"
        )));
    }
    if timeout_ms == 0 {
        return Err(ConfigError::Validation(format!(
            "agents.{agent}.timeout_ms must be greater than 0"
        )));
    }
    Ok(())
}

impl AgentsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let openai = &self.openai;
        validate_model(
            "openai",
            openai.temperature,
            openai.max_tokens,
            openai.timeout_ms,
        )?;
        let anthropic = &self.anthropic;
        validate_model(
            "anthropic",
            anthropic.temperature,
            anthropic.max_tokens,
            anthropic.timeout_ms,
        )?;
        let cohere = &self.cohere;
        validate_model(
            "cohere",
            cohere.temperature,
            cohere.max_tokens,
            cohere.timeout_ms,
        )
    }
}
