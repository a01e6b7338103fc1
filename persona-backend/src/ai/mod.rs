pub mod mock;
pub mod openai;
pub mod types;

pub use mock::{MockAiClient, TraceEntry};
pub use openai::OpenAIClient;
pub use types::{AiError, AiResponse, ToolCall, ToolHistoryEntry, ToolResponse};

use crate::tools::ToolDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        write!(f, "{}", role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }
}

/// Model client used by the agent runner
pub enum AiClient {
    OpenAI(OpenAIClient),
    Mock(MockAiClient),
}

impl AiClient {
    /// Generate one model turn, offering `tools` and replaying `tool_history`
    pub async fn generate_with_tools(
        &self,
        model: &str,
        messages: Vec<Message>,
        tool_history: &[ToolHistoryEntry],
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        match self {
            AiClient::OpenAI(client) => {
                client
                    .generate_with_tools(model, messages, tool_history, tools)
                    .await
            }
            AiClient::Mock(client) => {
                client
                    .generate_with_tools(model, messages, tool_history, tools)
                    .await
            }
        }
    }

    /// Provider name for logging
    pub fn provider(&self) -> &'static str {
        match self {
            AiClient::OpenAI(_) => "openai",
            AiClient::Mock(_) => "mock",
        }
    }
}
