//! Single-shot recovery for agents that invent tools or leak tool-call markup.
//!
//! Two failure signatures of the same defect are recognised:
//! - the agent call fails with an error naming a tool that does not exist;
//! - the agent call succeeds but its final turn is multi-tool-call markup
//!   written as plain text instead of a structured call.
//!
//! Either one triggers exactly one retry with a corrective user turn appended
//! to the original conversation. Matching is by literal, case-sensitive
//! substrings because the signals only exist as free text from the upstream
//! model runtime; it breaks if that wording changes.

use super::message::{AgentReply, Message};
use super::traits::{Agent, AgentResult};
use crate::observability::Logger;
use std::sync::Arc;

/// Corrective turn appended before the retry.
pub const CORRECTIVE_INSTRUCTION: &str =
    "Use only the tools: downloadWebPage, checkUrl, generateContext.";

const ERROR_TOOL_MARKER: &str = "tool";
const ERROR_EXIST_MARKER: &str = "exist";
const MARKUP_OPEN_MARKER: &str = "<multi_tool_use";
const MARKUP_USES_MARKER: &str = "tool_uses";

const HALLUCINATED_TOOL_EVENT: &str = "Retry after hallucinated tool";
const MALFORMED_CONTENT_EVENT: &str = "Retry after hallucinated tool content";

/// Recoverable anomaly detected in an agent result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryTrigger {
    /// The call failed referencing a tool that does not exist.
    HallucinatedTool,
    /// The call succeeded but the last turn is textual multi-tool-call markup.
    MalformedToolCall,
}

impl RetryTrigger {
    pub fn event(self) -> &'static str {
        match self {
            Self::HallucinatedTool => HALLUCINATED_TOOL_EVENT,
            Self::MalformedToolCall => MALFORMED_CONTENT_EVENT,
        }
    }
}

pub fn is_hallucinated_tool_error(message: &str) -> bool {
    message.contains(ERROR_TOOL_MARKER) && message.contains(ERROR_EXIST_MARKER)
}

pub fn is_malformed_tool_markup(content: &str) -> bool {
    content.contains(MARKUP_OPEN_MARKER) && content.contains(MARKUP_USES_MARKER)
}

/// Offending text of a reply whose last turn is malformed markup.
///
/// Only textual content is inspected; structured blocks never match.
pub fn malformed_reply_content(reply: &AgentReply) -> Option<&str> {
    reply
        .last()
        .and_then(Message::text)
        .filter(|content| is_malformed_tool_markup(content))
}

/// Original conversation followed by the corrective user turn.
pub fn retry_messages(messages: &[Message]) -> Vec<Message> {
    let mut retry = Vec::with_capacity(messages.len() + 1);
    retry.extend_from_slice(messages);
    retry.push(Message::user(CORRECTIVE_INSTRUCTION));
    retry
}

/// Wraps agent calls with the one-retry recovery policy.
#[derive(Clone)]
pub struct ToolRetryGuard {
    logger: Arc<dyn Logger>,
}

impl ToolRetryGuard {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    pub async fn invoke_with_retry(
        &self,
        agent: &dyn Agent,
        messages: &[Message],
        correlation_id: &str,
    ) -> AgentResult {
        invoke_with_retry(agent, messages, correlation_id, self.logger.as_ref()).await
    }
}

/// Invoke `agent`, retrying once when the result shows a hallucinated tool.
///
/// The retry result is returned as-is, whatever it contains, so an agent is
/// invoked at most twice.
pub async fn invoke_with_retry(
    agent: &dyn Agent,
    messages: &[Message],
    correlation_id: &str,
    logger: &dyn Logger,
) -> AgentResult {
    let first = agent.invoke(messages).await;
    let Some(trigger) = classify(&first) else {
        return first;
    };

    logger.warn(trigger.event(), correlation_id, &offending_detail(&first));
    tracing::debug!(
        agent = agent.name(),
        chat_id = %correlation_id,
        ?trigger,
        "retrying agent call with corrective instruction"
    );
    agent.invoke(&retry_messages(messages)).await
}

/// Classify an agent result without acting on it.
pub fn classify(result: &AgentResult) -> Option<RetryTrigger> {
    match result {
        Ok(reply) => malformed_reply_content(reply).map(|_| RetryTrigger::MalformedToolCall),
        Err(error) => is_hallucinated_tool_error(&error.to_string())
            .then_some(RetryTrigger::HallucinatedTool),
    }
}

/// Error text, or the text of the last turn, for the retry warning.
fn offending_detail(result: &AgentResult) -> String {
    match result {
        Ok(reply) => reply
            .last()
            .and_then(Message::text)
            .unwrap_or_default()
            .to_string(),
        Err(error) => error.to_string(),
    }
}
