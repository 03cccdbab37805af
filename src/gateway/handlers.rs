use crate::agent::AgentKind;
use crate::error::AgentError;
use crate::providers::sanitize_api_error;
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{AppState, ChatRequestBody};

const NO_MESSAGES: &str = "No messages available";

/// GET /health: enabled agents
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let agents: Vec<String> = state
        .agents
        .enabled()
        .iter()
        .map(ToString::to_string)
        .collect();
    Json(serde_json::json!({
        "status": "ok",
        "agents": agents,
    }))
}

/// POST /api/{agent}: answer one chat turn through the retry guard
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    Path(agent_name): Path<String>,
    body: Result<Json<ChatRequestBody>, JsonRejection>,
) -> impl IntoResponse {
    let kind = match agent_name.parse::<AgentKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::warn!(agent = %agent_name, "rejected chat request: {e}");
            let err = serde_json::json!({"error": e.to_string()});
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => {
            let err = serde_json::json!({
                "error": format!("Invalid JSON: {e}. Expected: {{\"message\": \"...\"}}")
            });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    let agent = match state.agents.get(kind) {
        Ok(agent) => agent,
        Err(e) => {
            tracing::warn!(agent = %kind, "chat request for disabled agent: {e}");
            let err = serde_json::json!({"error": "Agent not configured"});
            return (StatusCode::SERVICE_UNAVAILABLE, Json(err));
        }
    };

    let chat_id = body
        .chat_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let messages = body.conversation();

    tracing::info!(
        agent = %kind,
        chat_id = %chat_id,
        turns = messages.len(),
        "chat request received"
    );

    match state
        .guard
        .invoke_with_retry(agent.as_ref(), &messages, &chat_id)
        .await
    {
        Ok(reply) => {
            let content = reply
                .final_text()
                .unwrap_or_else(|| NO_MESSAGES.to_string());
            (StatusCode::OK, Json(serde_json::json!({"content": content})))
        }
        Err(e) => {
            log_agent_failure(agent.name(), &chat_id, &e);
            let err = serde_json::json!({"error": "Internal Server Error"});
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err))
        }
    }
}

fn log_agent_failure(agent: &str, chat_id: &str, error: &AgentError) {
    tracing::error!(
        agent,
        chat_id = %chat_id,
        "Error processing request: {}",
        sanitize_api_error(&error.to_string())
    );
}
