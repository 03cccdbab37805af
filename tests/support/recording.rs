use ai_answers::agent::{Agent, AgentResult, Message};
use ai_answers::error::AgentError;
use ai_answers::observability::Logger;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Ordered trace of agent calls and logger warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Invoke(usize),
    Warn {
        event: String,
        correlation_id: String,
        detail: String,
    },
}

pub type Trace = Arc<Mutex<Vec<Event>>>;

pub fn new_trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn snapshot(trace: &Trace) -> Vec<Event> {
    trace
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

pub struct RecordingLogger {
    trace: Trace,
}

impl RecordingLogger {
    pub fn new(trace: Trace) -> Self {
        Self { trace }
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, event: &str, correlation_id: &str, detail: &str) {
        self.trace
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Event::Warn {
                event: event.to_string(),
                correlation_id: correlation_id.to_string(),
                detail: detail.to_string(),
            });
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Agent that replays canned results and records each conversation it sees.
pub struct ScriptedAgent {
    results: Mutex<VecDeque<AgentResult>>,
    calls: Mutex<Vec<Vec<Message>>>,
    trace: Trace,
}

impl ScriptedAgent {
    pub fn new(trace: Trace, results: Vec<AgentResult>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            calls: Mutex::new(Vec::new()),
            trace,
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, messages: &[Message]) -> AgentResult {
        let call_index = {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            calls.push(messages.to_vec());
            calls.len()
        };
        self.trace
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Event::Invoke(call_index));
        self.results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::invocation("script exhausted")))
    }
}
