use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::AppState;

/// Fields are loosely typed so that wrong-typed values are reported as a
/// missing query or an unknown agent rather than as a body parse failure.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub selected_agent: Option<Value>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub final_output: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-facing failures of `/api/chat`. The message is all the caller sees.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Query is required in the request body.")]
    InvalidRequest,
    #[error("Invalid agent selected.")]
    UnknownAgent,
    #[error("An internal server error occurred while processing your request.")]
    Internal,
}

impl ResponseError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::InvalidRequest | ChatError::UnknownAgent => StatusCode::BAD_REQUEST,
            ChatError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/chat").route(web::post().to(chat)));
}

async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ChatError> {
    let request_id = Uuid::new_v4();
    let ChatRequest {
        query,
        selected_agent,
    } = body.into_inner();

    let query = query
        .as_ref()
        .and_then(Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or(ChatError::InvalidRequest)?;

    let selected_agent = selected_agent.unwrap_or(Value::Null);
    log::info!("[CHAT] {} Received query for agent: {}", request_id, selected_agent);

    let agent = selected_agent
        .as_str()
        .and_then(|name| state.agents.get(name))
        .ok_or_else(|| {
            log::warn!("[CHAT] {} Unknown agent selected: {}", request_id, selected_agent);
            ChatError::UnknownAgent
        })?;

    match state.runner.run(&agent, query).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ChatResponse {
            final_output: result.final_output,
        })),
        Err(e) => {
            log::error!(
                "[CHAT] {} An error occurred during the agent run for '{}': {}",
                request_id,
                agent.name,
                e
            );
            Err(ChatError::Internal)
        }
    }
}
