use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::ui::session::ChatEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response did not contain finalOutput")]
    MissingOutput,
}

/// Delivers one chat envelope and returns the agent's final text
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, envelope: &ChatEnvelope) -> Result<String, TransportError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatReply {
    final_output: Option<String>,
    error: Option<String>,
}

/// POSTs envelopes to `<base_url>/api/chat`
#[derive(Clone)]
pub struct HttpChatTransport {
    client: Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(base_url: &str) -> Self {
        HttpChatTransport {
            client: crate::http::shared_client().clone(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, envelope: &ChatEnvelope) -> Result<String, TransportError> {
        log::debug!("[CHAT_UI] POST {} ({})", self.endpoint, envelope.selected_agent);

        let response = self.client.post(&self.endpoint).json(envelope).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let reply: Option<ChatReply> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = reply.and_then(|r| r.error).unwrap_or(body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        reply
            .and_then(|r| r.final_output)
            .ok_or(TransportError::MissingOutput)
    }
}
