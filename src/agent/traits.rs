use super::message::{AgentReply, Message};
use crate::error::AgentError;
use async_trait::async_trait;

/// Result of one agent invocation.
pub type AgentResult = Result<AgentReply, AgentError>;

/// A capability that turns a conversation into new conversational turns.
///
/// Implementations receive the full ordered conversation and return it
/// extended with their own turns, or fail with a descriptive error.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent identifier (e.g. "openai", "claude").
    fn name(&self) -> &str;

    async fn invoke(&self, messages: &[Message]) -> AgentResult;
}
