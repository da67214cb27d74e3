//! Turns a proxy envelope into the displayable [`ResponseData`].

use std::collections::HashMap;

use crate::model::ResponseData;
use crate::proxy::ProxyEnvelope;

pub fn interpret(envelope: ProxyEnvelope, elapsed_ms: u64) -> ResponseData {
    let content_type = header_value(&envelope.headers, "content-type");

    let is_json = content_type.as_deref().is_some_and(is_json_content);

    let body = if is_json && !envelope.is_base64 {
        pretty_json(&envelope.body).unwrap_or_else(|| envelope.body.clone())
    } else {
        envelope.body.clone()
    };

    ResponseData {
        status: envelope.status,
        status_text: envelope.status_text,
        headers: envelope.headers,
        body,
        raw_body: envelope.body,
        content_type,
        is_base64: envelope.is_base64,
        time: elapsed_ms,
    }
}

/// `application/json` and the structured `+json` suffix types.
pub fn is_json_content(content_type: &str) -> bool {
    let ct = content_type.to_lowercase();
    ct.contains("application/json") || ct.contains("+json")
}

fn header_value(headers: &HashMap<String, String>, name: &str) -> Option<String> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.clone())
}

fn pretty_json(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
