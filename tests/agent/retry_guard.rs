use super::recording::{Event, RecordingLogger, ScriptedAgent, new_trace, snapshot};
use ai_answers::agent::{
    AgentReply, CORRECTIVE_INSTRUCTION, Message, MessageRole, ToolRetryGuard, invoke_with_retry,
};
use ai_answers::error::AgentError;
use std::sync::Arc;

const MALFORMED: &str =
    "<multi_tool_use.parallel>{\"tool_uses\":[{\"recipient_name\":\"functions.checkUrl\"}]}";

fn conversation() -> Vec<Message> {
    vec![
        Message::system("You answer questions about Government of Canada services."),
        Message::user("How do I apply for EI?"),
    ]
}

fn answer(text: &str) -> AgentReply {
    let mut messages = conversation();
    messages.push(Message::assistant(text));
    AgentReply::new(messages)
}

fn corrected(messages: &[Message]) -> Vec<Message> {
    let mut expected = messages.to_vec();
    expected.push(Message::user(CORRECTIVE_INSTRUCTION));
    expected
}

#[tokio::test]
async fn clean_reply_is_returned_after_one_call() {
    let trace = new_trace();
    let agent = ScriptedAgent::new(trace.clone(), vec![Ok(answer("Apply online."))]);
    let logger = RecordingLogger::new(trace.clone());
    let messages = conversation();

    let result = invoke_with_retry(&agent, &messages, "chat-1", &logger).await;

    assert_eq!(result, Ok(answer("Apply online.")));
    assert_eq!(snapshot(&trace), vec![Event::Invoke(1)]);
}

#[tokio::test]
async fn hallucinated_tool_error_retries_once_with_corrective_turn() {
    let trace = new_trace();
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![
            Err(AgentError::invocation("Tool searchCanada does not exist")),
            Ok(answer("Apply online.")),
        ],
    );
    let logger = RecordingLogger::new(trace.clone());
    let messages = conversation();

    let result = invoke_with_retry(&agent, &messages, "chat-2", &logger).await;

    assert_eq!(result, Ok(answer("Apply online.")));
    let calls = agent.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], messages);
    assert_eq!(calls[1], corrected(&messages));
    assert_eq!(
        snapshot(&trace),
        vec![
            Event::Invoke(1),
            Event::Warn {
                event: "Retry after hallucinated tool".into(),
                correlation_id: "chat-2".into(),
                detail: "Tool searchCanada does not exist".into(),
            },
            Event::Invoke(2),
        ]
    );
}

#[tokio::test]
async fn malformed_markup_reply_retries_once_and_logs_content() {
    let trace = new_trace();
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![Ok(answer(MALFORMED)), Ok(answer("Use the EI portal."))],
    );
    let logger = RecordingLogger::new(trace.clone());
    let messages = conversation();

    let result = invoke_with_retry(&agent, &messages, "chat-3", &logger).await;

    assert_eq!(result, Ok(answer("Use the EI portal.")));
    let calls = agent.calls();
    assert_eq!(calls[1], corrected(&messages));
    assert_eq!(
        snapshot(&trace),
        vec![
            Event::Invoke(1),
            Event::Warn {
                event: "Retry after hallucinated tool content".into(),
                correlation_id: "chat-3".into(),
                detail: MALFORMED.into(),
            },
            Event::Invoke(2),
        ]
    );
}

#[tokio::test]
async fn unrelated_error_is_returned_without_retry() {
    let trace = new_trace();
    let failure = AgentError::request("openai", "429 Too Many Requests: rate limited");
    let agent = ScriptedAgent::new(trace.clone(), vec![Err(failure.clone())]);
    let logger = RecordingLogger::new(trace.clone());

    let result = invoke_with_retry(&agent, &conversation(), "chat-4", &logger).await;

    assert_eq!(result, Err(failure));
    assert_eq!(snapshot(&trace), vec![Event::Invoke(1)]);
}

#[tokio::test]
async fn retry_failure_propagates_without_third_call() {
    let trace = new_trace();
    let second = AgentError::invocation("tool checkUrl2 does not exist either");
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![
            Err(AgentError::invocation("tool checkUrl2 does not exist")),
            Err(second.clone()),
            Ok(answer("never reached")),
        ],
    );
    let guard = ToolRetryGuard::new(Arc::new(RecordingLogger::new(trace.clone())));

    let result = guard
        .invoke_with_retry(&agent, &conversation(), "chat-5")
        .await;

    assert_eq!(result, Err(second));
    assert_eq!(agent.calls().len(), 2);
    let warnings = snapshot(&trace)
        .into_iter()
        .filter(|event| matches!(event, Event::Warn { .. }))
        .count();
    assert_eq!(warnings, 1);
}

#[tokio::test]
async fn caller_messages_are_left_untouched() {
    let trace = new_trace();
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![
            Err(AgentError::invocation("tool foo does not exist")),
            Ok(answer("done")),
        ],
    );
    let logger = RecordingLogger::new(trace);
    let messages = conversation();
    let before = messages.clone();

    let _ = invoke_with_retry(&agent, &messages, "chat-6", &logger).await;

    assert_eq!(messages, before);
    assert!(
        agent.calls()[0]
            .iter()
            .all(|message| message.text() != Some(CORRECTIVE_INSTRUCTION))
    );
}

#[tokio::test]
async fn corrective_turn_is_appended_even_if_already_present() {
    let trace = new_trace();
    let mut messages = conversation();
    messages.push(Message::user(CORRECTIVE_INSTRUCTION));
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![Ok(answer(MALFORMED)), Ok(answer("fine"))],
    );
    let logger = RecordingLogger::new(trace);

    let _ = invoke_with_retry(&agent, &messages, "chat-7", &logger).await;

    let retry = &agent.calls()[1];
    assert_eq!(retry.len(), messages.len() + 1);
    let corrective = retry
        .iter()
        .filter(|message| {
            message.role == MessageRole::User && message.text() == Some(CORRECTIVE_INSTRUCTION)
        })
        .count();
    assert_eq!(corrective, 2);
}

#[tokio::test]
async fn malformed_reply_then_tool_error_stops_after_second_call() {
    let trace = new_trace();
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![
            Ok(answer(MALFORMED)),
            Err(AgentError::invocation("tool foo does not exist")),
            Ok(answer("never reached")),
        ],
    );
    let logger = RecordingLogger::new(trace.clone());

    let result = invoke_with_retry(&agent, &conversation(), "chat-8", &logger).await;

    assert_eq!(
        result,
        Err(AgentError::invocation("tool foo does not exist"))
    );
    assert_eq!(agent.calls().len(), 2);
    let warnings: Vec<Event> = snapshot(&trace)
        .into_iter()
        .filter(|event| matches!(event, Event::Warn { .. }))
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings[0],
        Event::Warn { event, .. } if event == "Retry after hallucinated tool content"
    ));
}

#[tokio::test]
async fn tool_error_then_malformed_reply_returns_reply_verbatim() {
    let trace = new_trace();
    let agent = ScriptedAgent::new(
        trace.clone(),
        vec![
            Err(AgentError::invocation("tool foo does not exist")),
            Ok(answer(MALFORMED)),
            Ok(answer("never reached")),
        ],
    );
    let logger = RecordingLogger::new(trace.clone());

    let result = invoke_with_retry(&agent, &conversation(), "chat-9", &logger).await;

    assert_eq!(result, Ok(answer(MALFORMED)));
    assert_eq!(agent.calls().len(), 2);
    assert_eq!(
        snapshot(&trace)
            .iter()
            .filter(|event| matches!(event, Event::Warn { .. }))
            .count(),
        1
    );
}
