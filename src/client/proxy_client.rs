//! Client for the same-origin proxy endpoint.
//!
//! The proxy answers with two shapes: an envelope on HTTP 200, or an
//! `{ "error": ... }` body. Both collapse here into one `Result`.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

use crate::error::ClientError;
use crate::pipeline::PreparedRequest;
use crate::proxy::{ProxyEnvelope, ProxyRequest};

/// Path of the proxy endpoint relative to the backend origin.
pub const PROXY_PATH: &str = "/api/proxy";

pub trait ProxyClient: Send + Sync {
    fn send(
        &self,
        request: ProxyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProxyEnvelope, ClientError>> + Send + '_>>;
}

impl From<PreparedRequest> for ProxyRequest {
    fn from(prepared: PreparedRequest) -> Self {
        Self {
            url: Some(prepared.url),
            method: prepared.method.as_str().to_string(),
            headers: prepared.headers,
            body: prepared.body,
        }
    }
}

pub struct HttpProxyClient {
    client: Client,
    endpoint: String,
}

impl HttpProxyClient {
    /// Creates a client for the backend at `base_url`, e.g. `http://127.0.0.1:3000`.
    ///
    /// The backend is same-origin, so system proxy settings are ignored.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), PROXY_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: ProxyRequest) -> Result<ProxyEnvelope, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        read_envelope(status, &bytes)
    }
}

impl ProxyClient for HttpProxyClient {
    fn send(
        &self,
        request: ProxyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProxyEnvelope, ClientError>> + Send + '_>> {
        Box::pin(self.post(request))
    }
}

/// Interprets a proxy reply given its transport status and raw body.
pub fn read_envelope(status: StatusCode, bytes: &[u8]) -> Result<ProxyEnvelope, ClientError> {
    let payload: Value = serde_json::from_slice(bytes).unwrap_or(Value::Null);

    if status.is_success() && payload.get("status").is_some() {
        return serde_json::from_value(payload).map_err(|e| ClientError::ProxyRejected {
            status: None,
            status_text: None,
            message: format!("Malformed proxy envelope: {}", e),
        });
    }

    let message = payload
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Proxy request failed with status {}", status.as_u16()));

    Err(ClientError::ProxyRejected {
        status: payload
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok()),
        status_text: payload
            .get("statusText")
            .and_then(Value::as_str)
            .map(str::to_string),
        message,
    })
}
