pub mod message;
pub mod registry;
pub mod retry;
pub mod traits;

pub use message::{AgentReply, ContentBlock, Message, MessageContent, MessageRole};
pub use registry::{AgentKind, AgentSet};
pub use retry::{CORRECTIVE_INSTRUCTION, RetryTrigger, ToolRetryGuard, invoke_with_retry};
pub use traits::{Agent, AgentResult};
