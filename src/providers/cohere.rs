use super::http_client::build_provider_client;
use super::scrub::scrub_secret_patterns;
use super::with_reply;
use crate::agent::{Agent, AgentResult, Message, MessageRole};
use crate::config::CohereConfig;
use crate::error::AgentError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "cohere";

/// Agent backed by the Cohere v1 chat API.
///
/// The v1 API takes the newest turn as `message` and everything before it as
/// `chat_history`; a leading system turn becomes the `preamble`.
pub struct CohereAgent {
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
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    chat_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<String>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct HistoryEntry {
    role: &'static str,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    text: String,
}

fn history_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "USER",
        MessageRole::Assistant => "CHATBOT",
        MessageRole::System => "SYSTEM",
    }
}

impl CohereAgent {
    pub fn from_config(config: &CohereConfig) -> Self {
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
            cached_chat_url: format!("{base}/v1/chat"),
            client: build_provider_client(config.timeout_ms),
        }
    }

    fn build_request<'a>(&'a self, messages: &[Message]) -> Result<ChatRequest<'a>, AgentError> {
        let Some((last, earlier)) = messages.split_last() else {
            return Err(AgentError::invocation("cohere: no message to send"));
        };

        let (preamble, history) = match earlier.split_first() {
            Some((first, rest)) if first.role == MessageRole::System => {
                (Some(first.content.flatten_text()), rest)
            }
            _ => (None, earlier),
        };

        Ok(ChatRequest {
            model: &self.model,
            message: last.content.flatten_text(),
            chat_history: history
                .iter()
                .map(|message| HistoryEntry {
                    role: history_role(message.role),
                    message: message.content.flatten_text(),
                })
                .collect(),
            preamble,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[async_trait]
impl Agent for CohereAgent {
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
        let request = self.build_request(messages)?;

        tracing::debug!(
            model = %self.model,
            message_len = request.message.len(),
            history_len = request.chat_history.len(),
            "cohere request"
        );

        let response = self
            .client
            .post(&self.cached_chat_url)
            .bearer_auth(api_key)
            .json(&request)
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
        if chat.text.trim().is_empty() {
            return Err(AgentError::EmptyResponse {
                provider: PROVIDER.into(),
            });
        }

        Ok(with_reply(messages, chat.text))
    }
}
