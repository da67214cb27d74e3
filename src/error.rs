use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use thiserror::Error;

use crate::model::ResponseData;

/// Failures of the proxy execution service.
///
/// Rendered as the `{ "error": "<message>" }` failure envelope.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Status text carried by synthetic responses for pipeline-local failures.
pub const CLIENT_ERROR_STATUS_TEXT: &str = "Client Error";

/// Status text used when the proxy rejects a call without naming one.
pub const PROXY_ERROR_STATUS_TEXT: &str = "Proxy Error";

/// Failures of one send, before or around the proxy call.
///
/// Upstream error statuses are not failures: a 404 from the target is a
/// normal envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Invalid JSON body: {0}")]
    InvalidJsonBody(String),

    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    ProxyRejected {
        status: Option<u16>,
        status_text: Option<String>,
        message: String,
    },
}

impl ClientError {
    /// Converts the failure into the response shown for a settled-error send.
    pub fn into_response_data(self, elapsed_ms: u64) -> ResponseData {
        let (status, status_text) = match &self {
            ClientError::InvalidJsonBody(_) | ClientError::Transport(_) => {
                (0, CLIENT_ERROR_STATUS_TEXT.to_string())
            }
            ClientError::ProxyRejected {
                status,
                status_text,
                ..
            } => (
                status.unwrap_or(500),
                status_text
                    .clone()
                    .unwrap_or_else(|| PROXY_ERROR_STATUS_TEXT.to_string()),
            ),
        };

        let payload = serde_json::json!({ "error": self.to_string() });
        let body = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());

        ResponseData {
            status,
            status_text,
            headers: HashMap::new(),
            raw_body: body.clone(),
            body,
            content_type: Some("application/json".to_string()),
            is_base64: false,
            time: elapsed_ms,
        }
    }
}
