use crate::io_struct::ResponseEnvelope;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;

pub const MISSING_TEXT_MESSAGE: &str = "Missing required parameter: text";

/// Errors caused by the caller. Always answered with a 4xx envelope.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{}", MISSING_TEXT_MESSAGE)]
    MissingText,

    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    #[error("Payload exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingText | GatewayError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ResponseEnvelope::client_error(self.to_string()))
    }
}

/// Failures of the outbound chat-completion call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(String),

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Value },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid API response format")]
    NoContent,
}

impl UpstreamError {
    /// Upstream payload worth echoing back to the caller as `errorDetails`.
    pub fn details(&self) -> Value {
        match self {
            UpstreamError::Status { body, .. } if !body.is_null() => body.clone(),
            _ => Value::String("No error details available".to_string()),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}
