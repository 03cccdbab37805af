use super::Config;

/// First non-empty value among `keys`, in order.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = first_env(&["AI_ANSWERS_OPENAI_API_KEY", "OPENAI_API_KEY"]) {
            self.agents.openai.api_key = Some(key);
        }

        if let Some(key) = first_env(&["AI_ANSWERS_ANTHROPIC_API_KEY", "ANTHROPIC_API_KEY"]) {
            self.agents.anthropic.api_key = Some(key);
        }

        if let Some(key) = first_env(&["AI_ANSWERS_COHERE_API_KEY", "COHERE_API_KEY"]) {
            self.agents.cohere.api_key = Some(key);
        }

        if let Some(port_str) = first_env(&["AI_ANSWERS_GATEWAY_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = first_env(&["AI_ANSWERS_GATEWAY_HOST", "HOST"]) {
            self.gateway.host = host;
        }

        if let Some(level) = first_env(&["AI_ANSWERS_LOG_LEVEL"]) {
            self.observability.log_level = level;
        }
    }
}
