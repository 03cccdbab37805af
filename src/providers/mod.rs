pub mod anthropic;
pub mod cohere;
pub mod http_client;
pub mod openai;
pub mod scrub;

pub use anthropic::AnthropicAgent;
pub use cohere::CohereAgent;
pub use http_client::build_provider_client;
pub use openai::OpenAiAgent;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};

use crate::agent::{AgentReply, Message};

/// The input conversation followed by one assistant turn.
pub(crate) fn with_reply(messages: &[Message], text: String) -> AgentReply {
    let mut extended = Vec::with_capacity(messages.len() + 1);
    extended.extend_from_slice(messages);
    extended.push(Message::assistant(text));
    AgentReply::new(extended)
}
