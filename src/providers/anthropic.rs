use super::http_client::build_provider_client;
use super::scrub::scrub_secret_patterns;
use super::with_reply;
use crate::agent::{Agent, AgentResult, Message, MessageRole};
use crate::config::AnthropicConfig;
use crate::error::AgentError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "anthropic";
const API_VERSION: &str = "2023-06-01";

/// Agent backed by the Anthropic messages API.
pub struct AnthropicAgent {
    api_key: Option<String>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    beta: Option<String>,
    cached_messages_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    content: Vec<ResponseContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

impl AnthropicAgent {
    pub fn from_config(config: &AnthropicConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(ToString::to_string),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            beta: config.beta.clone().filter(|beta| !beta.trim().is_empty()),
            cached_messages_url: format!("{base}/v1/messages"),
            client: build_provider_client(config.timeout_ms),
        }
    }

    /// System turns move to the top-level `system` field; the rest keep order.
    fn build_request<'a>(&'a self, messages: &[Message]) -> ChatRequest<'a> {
        let system_parts: Vec<String> = messages
            .iter()
            .filter(|message| message.role == MessageRole::System)
            .map(|message| message.content.flatten_text())
            .filter(|text| !text.is_empty())
            .collect();

        let chat = messages
            .iter()
            .filter(|message| message.role != MessageRole::System)
            .map(|message| ChatMessage {
                role: message.role.as_str(),
                content: message.content.flatten_text(),
            })
            .collect();

        ChatRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: (!system_parts.is_empty()).then(|| system_parts.join("\n\n")),
            messages: chat,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl Agent for AnthropicAgent {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn invoke(&self, messages: &[Message]) -> AgentResult {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::MissingApiKey {
                provider: PROVIDER.into(),
            })?;

        let mut request = self
            .client
            .post(&self.cached_messages_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION);
        if let Some(beta) = &self.beta {
            request = request.header("anthropic-beta", beta);
        }

        let response = request
            .json(&self.build_request(messages))
            .send()
            .await
            .map_err(|e| AgentError::request(PROVIDER, scrub_secret_patterns(&e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::request(
                PROVIDER,
                format!("{status}: {}", scrub_secret_patterns(&body)),
            ));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::request(PROVIDER, format!("invalid response body: {e}")))?;

        let text = chat
            .content
            .into_iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text),
                ResponseContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            return Err(AgentError::EmptyResponse {
                provider: PROVIDER.into(),
            });
        }

        tracing::debug!(model = %self.model, chars = text.len(), "anthropic reply received");
        Ok(with_reply(messages, text))
    }
}
