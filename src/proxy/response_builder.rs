//! Envelope construction for proxied responses.
//!
//! Decides whether an upstream body travels as text or as base64.

use super::types::ProxyEnvelope;
use base64::Engine;
use reqwest::{header::HeaderMap, StatusCode};
use std::collections::HashMap;

/// Determines if a body can be carried as text based on its content type.
///
/// JSON (including `+json` suffix types), any `text/*`, XML and SVG are
/// text. Everything else, including a missing content type, is binary.
pub fn is_text_content(content_type: Option<&str>) -> bool {
    let ct = match content_type {
        Some(ct) => ct.to_lowercase(),
        None => return false,
    };

    let text_types = [
        "text/",
        "application/json",
        "+json",
        "xml",
        "image/svg+xml",
    ];

    text_types.iter().any(|t| ct.contains(t))
}

/// Flattens a header map, joining repeated names with `", "`.
pub fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).to_string();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// Builds the envelope for an upstream response.
pub fn build_envelope(status: StatusCode, headers: &HeaderMap, body_bytes: &[u8]) -> ProxyEnvelope {
    let headers = collect_headers(headers);
    let content_type = headers.get("content-type").map(|s| s.as_str());

    let (body, is_base64) = if is_text_content(content_type) {
        (String::from_utf8_lossy(body_bytes).to_string(), false)
    } else {
        (
            base64::engine::general_purpose::STANDARD.encode(body_bytes),
            true,
        )
    };

    ProxyEnvelope {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        headers,
        body,
        is_base64,
    }
}
