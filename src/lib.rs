#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod agent;
pub mod config;
pub mod error;
pub mod gateway;
#[doc(hidden)]
pub mod observability;
pub mod providers;

pub use agent::{
    Agent, AgentKind, AgentReply, AgentSet, CORRECTIVE_INSTRUCTION, Message, ToolRetryGuard,
    invoke_with_retry,
};
pub use config::Config;
pub use error::{AgentError, AnswersError};
