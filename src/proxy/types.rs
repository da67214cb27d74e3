use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request posted to the proxy endpoint by the browser-side client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRequest {
    /// Target URL. Missing or empty is rejected with 400.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Normalized description of an upstream response.
///
/// Always delivered with HTTP 200; the upstream status travels inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEnvelope {
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    /// UTF-8 text, or base64 when `is_base64` is set.
    pub body: String,
    pub is_base64: bool,
}
