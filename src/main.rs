#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use ai_answers::agent::{AgentSet, Message, ToolRetryGuard};
use ai_answers::config::ConfigOrigin;
use ai_answers::{Config, gateway, observability};
use anyhow::{Context, Result};
use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (mut config, origin) = match &cli.config {
        Some(path) => Config::load_or_init_at(path)?,
        None => Config::load_or_init()?,
    };
    config.apply_env_overrides();
    observability::init_tracing(&config.observability)?;
    if origin == ConfigOrigin::Created {
        tracing::info!(path = %config.config_path.display(), "wrote default config");
    }

    dispatch(cli.command, config).await
}

async fn dispatch(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            gateway::run_gateway(config).await
        }
        Commands::Ask {
            agent,
            message,
            system,
            chat_id,
        } => run_ask(&config, &agent, message, system, chat_id).await,
        Commands::ConfigPath => {
            println!("{}", config.config_path.display());
            Ok(())
        }
    }
}

async fn run_ask(
    config: &Config,
    agent_name: &str,
    message: String,
    system: Option<String>,
    chat_id: Option<String>,
) -> Result<()> {
    let agents = AgentSet::from_config(&config.agents);
    let agent = agents.get_by_name(agent_name)?;
    let guard = ToolRetryGuard::new(observability::create_logger(&config.observability));
    let chat_id = chat_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut messages = Vec::with_capacity(2);
    messages.extend(system.map(Message::system));
    messages.push(Message::user(message));

    let reply = guard
        .invoke_with_retry(agent.as_ref(), &messages, &chat_id)
        .await
        .with_context(|| format!("agent {agent_name} failed to answer"))?;

    println!(
        "{}",
        reply
            .final_text()
            .unwrap_or_else(|| "No messages available".to_string())
    );
    Ok(())
}
