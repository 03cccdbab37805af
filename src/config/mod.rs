pub mod schema;

pub use schema::{
    AgentsConfig, AnthropicConfig, CohereConfig, Config, ConfigOrigin, GatewayConfig,
    ObservabilityConfig, OpenAiConfig,
};
