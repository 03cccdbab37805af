use super::traits::Agent;
use crate::config::AgentsConfig;
use crate::error::AgentError;
use crate::providers::{AnthropicAgent, CohereAgent, OpenAiAgent};
use std::str::FromStr;
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Agents the gateway can route a conversation to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AgentKind {
    #[strum(serialize = "openai")]
    OpenAi,
    Claude,
    Cohere,
}

impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "claude" | "anthropic" => Ok(Self::Claude),
            "cohere" => Ok(Self::Cohere),
            _ => Err(AgentError::UnknownAgent(name.to_string())),
        }
    }
}

/// The agents built once at startup and shared by every request.
#[derive(Clone, Default)]
pub struct AgentSet {
    openai: Option<Arc<dyn Agent>>,
    claude: Option<Arc<dyn Agent>>,
    cohere: Option<Arc<dyn Agent>>,
}

impl AgentSet {
    pub fn from_config(config: &AgentsConfig) -> Self {
        let openai = config
            .openai
            .enabled
            .then(|| Arc::new(OpenAiAgent::from_config(&config.openai)) as Arc<dyn Agent>);
        let claude = config
            .anthropic
            .enabled
            .then(|| Arc::new(AnthropicAgent::from_config(&config.anthropic)) as Arc<dyn Agent>);
        let cohere = config
            .cohere
            .enabled
            .then(|| Arc::new(CohereAgent::from_config(&config.cohere)) as Arc<dyn Agent>);

        for kind in AgentKind::iter() {
            let enabled = match kind {
                AgentKind::OpenAi => openai.is_some(),
                AgentKind::Claude => claude.is_some(),
                AgentKind::Cohere => cohere.is_some(),
            };
            tracing::info!(agent = %kind, enabled, "agent configured");
        }

        Self {
            openai,
            claude,
            cohere,
        }
    }

    pub fn with_agent(mut self, kind: AgentKind, agent: Arc<dyn Agent>) -> Self {
        *self.slot_mut(kind) = Some(agent);
        self
    }

    pub fn get(&self, kind: AgentKind) -> Result<Arc<dyn Agent>, AgentError> {
        self.slot(kind)
            .clone()
            .ok_or_else(|| AgentError::Unavailable {
                name: kind.to_string(),
            })
    }

    /// Resolve an agent by the name a client sent.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn Agent>, AgentError> {
        self.get(name.parse()?)
    }

    pub fn enabled(&self) -> Vec<AgentKind> {
        AgentKind::iter()
            .filter(|kind| self.slot(*kind).is_some())
            .collect()
    }

    fn slot(&self, kind: AgentKind) -> &Option<Arc<dyn Agent>> {
        match kind {
            AgentKind::OpenAi => &self.openai,
            AgentKind::Claude => &self.claude,
            AgentKind::Cohere => &self.cohere,
        }
    }

    fn slot_mut(&mut self, kind: AgentKind) -> &mut Option<Arc<dyn Agent>> {
        match kind {
            AgentKind::OpenAi => &mut self.openai,
            AgentKind::Claude => &mut self.claude,
            AgentKind::Cohere => &mut self.cohere,
        }
    }
}
