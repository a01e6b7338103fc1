pub mod agents;
pub mod chat;
pub mod health;

use actix_web::{error::InternalError, web, HttpResponse};

use chat::ErrorResponse;

/// JSON extractor config shared by all routes.
///
/// Unparseable bodies get the same `{error}` shape as the chat endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("[HTTP] Rejected request body: {}", err);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid JSON body.".to_string(),
            }),
        )
        .into()
    })
}
