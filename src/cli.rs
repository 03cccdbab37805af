use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `ai-answers` - chat backend that answers questions through hosted LLM agents.
#[derive(Parser, Debug)]
#[command(name = "ai-answers")]
#[command(version)]
#[command(about = "Route questions to hosted LLM agents with tool-call recovery.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.ai-answers/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask one question and print the answer
    Ask {
        /// Agent to use (openai, claude, anthropic, cohere)
        agent: String,

        /// The question
        message: String,

        /// System prompt placed before the question
        #[arg(short, long)]
        system: Option<String>,

        /// Correlation id for log lines (random when omitted)
        #[arg(long)]
        chat_id: Option<String>,
    },

    /// Print the config file location
    ConfigPath,
}
