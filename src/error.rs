use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `ai-answers`.
///
/// Each subsystem defines its own error type. Library callers can match on
/// these to decide how to report a failure; the binary and the startup paths
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum AnswersError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Agent / Provider ────────────────────────────────────────────────
    #[error("agent: {0}")]
    Agent(#[from] AgentError),

    // ── Gateway ─────────────────────────────────────────────────────────
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Agent errors ────────────────────────────────────────────────────────────

/// Failure of a single agent invocation.
///
/// The `Display` output is the diagnostic text the retry guard classifies,
/// so `Invocation` renders its message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("{0}")]
    Invocation(String),

    #[error("agent {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("agent {provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("agent {provider} returned no content")]
    EmptyResponse { provider: String },

    #[error("agent {name} is not configured")]
    Unavailable { name: String },

    #[error("invalid agent specified: {0}")]
    UnknownAgent(String),
}

impl AgentError {
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation(message.into())
    }

    pub fn request(provider: &str, message: impl Into<String>) -> Self {
        Self::Request {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

// ─── Gateway errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid bind address {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("server error: {0}")]
    Serve(String),
}
