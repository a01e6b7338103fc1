//! Scripted stand-in for the model API.
//!
//! Either replays a queue of canned responses in order, or answers every
//! request through a responder closure. Every request is recorded so tests
//! can assert what the runner sent and how many times it called out.

use crate::ai::types::{AiError, AiResponse, ToolHistoryEntry};
use crate::ai::Message;
use crate::tools::ToolDefinition;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// One recorded model request
#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub model: String,
    pub messages: Vec<Message>,
    pub tool_history: Vec<ToolHistoryEntry>,
    pub tool_names: Vec<String>,
}

impl TraceEntry {
    /// Content of the system message, if any
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == crate::ai::MessageRole::System)
            .map(|m| m.content.as_str())
    }

    /// Content of the last user message, if any
    pub fn user_query(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::ai::MessageRole::User)
            .map(|m| m.content.as_str())
    }
}

type Responder = dyn Fn(&TraceEntry) -> Result<AiResponse, AiError> + Send + Sync;

struct MockState {
    script: Mutex<VecDeque<Result<AiResponse, AiError>>>,
    responder: Option<Box<Responder>>,
    trace: Mutex<Vec<TraceEntry>>,
}

/// Cloning shares the script and the trace.
#[derive(Clone)]
pub struct MockAiClient {
    state: Arc<MockState>,
    latency: Option<Duration>,
}

impl MockAiClient {
    /// Replay `responses` in order; requests past the end fail
    pub fn new(responses: Vec<Result<AiResponse, AiError>>) -> Self {
        MockAiClient {
            state: Arc::new(MockState {
                script: Mutex::new(responses.into()),
                responder: None,
                trace: Mutex::new(Vec::new()),
            }),
            latency: None,
        }
    }

    /// Answer every request with `responder`
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&TraceEntry) -> Result<AiResponse, AiError> + Send + Sync + 'static,
    {
        MockAiClient {
            state: Arc::new(MockState {
                script: Mutex::new(VecDeque::new()),
                responder: Some(Box::new(responder)),
                trace: Mutex::new(Vec::new()),
            }),
            latency: None,
        }
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn generate_with_tools(
        &self,
        model: &str,
        messages: Vec<Message>,
        tool_history: &[ToolHistoryEntry],
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        let entry = TraceEntry {
            model: model.to_string(),
            messages,
            tool_history: tool_history.to_vec(),
            tool_names: tools.into_iter().map(|t| t.name).collect(),
        };
        self.state.trace.lock().push(entry.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(responder) = &self.state.responder {
            return responder(&entry);
        }

        self.state
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::new("Mock AI client has no more responses")))
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.state.trace.lock().len()
    }

    /// Every request received so far, in order
    pub fn trace(&self) -> Vec<TraceEntry> {
        self.state.trace.lock().clone()
    }
}
