//! Outbound request execution for the proxy endpoint.
//!
//! Forwards the caller's request to the target, following redirects, and
//! turns the upstream response into a [`ProxyEnvelope`].

use super::response_builder::build_envelope;
use super::types::{ProxyEnvelope, ProxyRequest};
use crate::config::Config;
use crate::error::AppError;
use reqwest::{header::HeaderName, Client, Method, Url};
use std::str::FromStr;

/// Request headers never forwarded; the outbound transport sets its own.
const STRIPPED_HEADERS: [&str; 4] = ["host", "content-length", "connection", "accept-encoding"];

/// Builds the shared outbound client.
pub fn build_client(config: &Config) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

fn is_stripped(name: &str) -> bool {
    STRIPPED_HEADERS
        .iter()
        .any(|stripped| name.eq_ignore_ascii_case(stripped))
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Execute a proxied request.
pub async fn execute_request(client: &Client, request: ProxyRequest) -> Result<ProxyEnvelope, AppError> {
    let raw_url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(AppError::MissingUrl)?;

    let url = Url::parse(&raw_url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", raw_url, e)))?;

    let method = Method::from_str(&request.method.to_uppercase())
        .map_err(|_| AppError::InvalidMethod(request.method.clone()))?;

    let mut builder = client.request(method.clone(), url);

    for (key, value) in &request.headers {
        if is_stripped(key) {
            continue;
        }
        match HeaderName::from_str(key) {
            Ok(name) => builder = builder.header(name, value),
            Err(_) => tracing::debug!(header = %key, "Dropping invalid header name"),
        }
    }

    if carries_body(&method) {
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
    }

    let response = builder.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.bytes().await?;

    tracing::debug!(
        status = status.as_u16(),
        bytes = body_bytes.len(),
        "Upstream responded"
    );

    Ok(build_envelope(status, &headers, &body_bytes))
}
