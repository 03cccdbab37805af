//! Axum-based HTTP gateway for the chat UI.
//!
//! - `POST /api/{agent}` answers one question through the tool-retry guard
//! - `GET /health` reports which agents are enabled
//! - request bodies are size-limited and whole requests time out

mod handlers;

use handlers::{handle_chat, handle_health};

use crate::agent::{AgentSet, Message, ToolRetryGuard};
use crate::config::{Config, GatewayConfig};
use crate::error::GatewayError;
use crate::observability;
use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<AgentSet>,
    pub guard: ToolRetryGuard,
}

impl AppState {
    pub fn new(agents: AgentSet, guard: ToolRetryGuard) -> Self {
        Self {
            agents: Arc::new(agents),
            guard,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let logger = observability::create_logger(&config.observability);
        Self::new(
            AgentSet::from_config(&config.agents),
            ToolRetryGuard::new(logger),
        )
    }
}

/// Chat request body as posted by the browser UI
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    pub message: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl ChatRequestBody {
    /// `[system]? ++ history ++ [user message]`
    pub fn conversation(&self) -> Vec<Message> {
        let system = self
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .map(Message::system);

        let mut messages = Vec::with_capacity(self.conversation_history.len() + 2);
        messages.extend(system);
        messages.extend_from_slice(&self.conversation_history);
        messages.push(Message::user(self.message.as_str()));
        messages
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the router with body-limit, timeout and CORS layers applied.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/{agent}", post(handle_chat))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(cors_layer(&config.cors_origins))
}

/// Run the HTTP gateway on the configured host and port.
pub async fn run_gateway(config: Config) -> Result<()> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e: std::net::AddrParseError| GatewayError::Bind {
            addr: format!("{host}:{port}"),
            message: e.to_string(),
        })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    run_gateway_with_listener(listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Config,
) -> Result<()> {
    let local_addr = listener.local_addr()?;
    let state = AppState::from_config(&config);
    let enabled: Vec<String> = state
        .agents
        .enabled()
        .iter()
        .map(ToString::to_string)
        .collect();
    let app = build_router(state, &config.gateway);

    tracing::info!(addr = %local_addr, agents = ?enabled, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GatewayError::Serve(e.to_string()))?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
