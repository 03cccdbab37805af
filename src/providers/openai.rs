use super::http_client::build_provider_client;
use super::scrub::scrub_secret_patterns;
use super::with_reply;
use crate::agent::{Agent, AgentResult, Message};
use crate::config::OpenAiConfig;
use crate::error::AgentError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "openai";

/// Agent backed by the OpenAI chat completions API.
pub struct OpenAiAgent {
    api_key: Option<String>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    cached_chat_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiAgent {
    pub fn from_config(config: &OpenAiConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };
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
            cached_chat_url,
            client: build_provider_client(config.timeout_ms),
        }
    }

    fn build_request<'a>(&'a self, messages: &[Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|message| ChatMessage {
                    role: message.role.as_str(),
                    content: message.content.flatten_text(),
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl Agent for OpenAiAgent {
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

        let response = self
            .client
            .post(&self.cached_chat_url)
            .bearer_auth(api_key)
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
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AgentError::EmptyResponse {
                provider: PROVIDER.into(),
            })?;

        tracing::debug!(model = %self.model, chars = text.len(), "openai reply received");
        Ok(with_reply(messages, text))
    }
}
