use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::AppState;
use crate::error::AppError;
use crate::proxy::{ProxyEnvelope, ProxyRequest};

pub async fn proxy_request(
    State(state): State<AppState>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected proxy payload");
        AppError::InvalidBody(rejection.body_text())
    })?;

    tracing::debug!(
        method = %request.method,
        url = request.url.as_deref().unwrap_or(""),
        "Proxying request"
    );

    match state.proxy.execute(request).await {
        Ok(envelope) => {
            tracing::debug!(status = envelope.status, "Request succeeded");
            Ok(Json(envelope))
        }
        Err(error) => {
            tracing::warn!(%error, "Request failed");
            Err(error)
        }
    }
}
