use serde::{Deserialize, Serialize};

use crate::agents::AGENT_NAMES;
use crate::ui::transport::{ChatTransport, TransportError};

/// Shown in place of an agent reply when the request fails for any reason
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A request is in flight; input is disabled
    Sending,
}

/// Body of a `POST /api/chat` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEnvelope {
    pub query: String,
    pub selected_agent: String,
}

/// One user's conversation: the message log, the selected agent, and
/// whether a request is outstanding.
///
/// The log is append-only and lives only as long as the session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    selected_agent: String,
    state: SessionState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(AGENT_NAMES[0])
    }
}

impl ChatSession {
    pub fn new(selected_agent: impl Into<String>) -> Self {
        ChatSession {
            messages: Vec::new(),
            selected_agent: selected_agent.into(),
            state: SessionState::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn selected_agent(&self) -> &str {
        &self.selected_agent
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Sending
    }

    /// Switch agents. Names outside the picker list are refused.
    pub fn select_agent(&mut self, name: &str) -> bool {
        if !AGENT_NAMES.contains(&name) {
            return false;
        }
        self.selected_agent = name.to_string();
        true
    }

    /// Start a submission: log the user's message and enter `Sending`.
    ///
    /// Returns `None` (and changes nothing) for blank input or while a
    /// request is already in flight.
    pub fn begin_submit(&mut self, input: &str) -> Option<ChatEnvelope> {
        let query = input.trim();
        if query.is_empty() || self.state != SessionState::Idle {
            return None;
        }

        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: query.to_string(),
        });
        self.state = SessionState::Sending;

        Some(ChatEnvelope {
            query: query.to_string(),
            selected_agent: self.selected_agent.clone(),
        })
    }

    /// Complete the in-flight submission with exactly one agent message.
    ///
    /// Returns `None` (and changes nothing) when no submission is in flight.
    pub fn finish(&mut self, result: Result<String, TransportError>) -> Option<&ChatMessage> {
        if self.state != SessionState::Sending {
            log::debug!("[CHAT_UI] Ignoring reply with no request in flight");
            return None;
        }

        let text = match result {
            Ok(output) => output,
            Err(e) => {
                log::warn!("[CHAT_UI] Request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };

        self.messages.push(ChatMessage {
            sender: Sender::Agent,
            text,
        });
        self.state = SessionState::Idle;
        self.messages.last()
    }

    /// Send `input` through `transport` and record the reply.
    ///
    /// `None` means the input was not submitted (see [`Self::begin_submit`]).
    pub async fn submit<T>(&mut self, input: &str, transport: &T) -> Option<&ChatMessage>
    where
        T: ChatTransport + ?Sized,
    {
        let envelope = self.begin_submit(input)?;
        let result = transport.send(&envelope).await;
        self.finish(result)
    }
}
