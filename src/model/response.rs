use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PREVIEW_TYPES: [&str; 4] = [
    "text/html",
    "image/svg+xml",
    "application/pdf",
    "application/xml",
];

/// The displayable result of one send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    /// Upstream status, or 0 for failures that never produced one.
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    /// Display copy; pretty-printed when the payload is JSON.
    pub body: String,
    /// Payload as received: text, or base64 when `is_base64` is set.
    pub raw_body: String,
    pub content_type: Option<String>,
    pub is_base64: bool,
    /// Milliseconds from dispatch to receipt of the full envelope.
    pub time: u64,
}

impl ResponseData {
    pub fn can_preview(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_previewable)
    }

    /// Renderable form of the payload. Bad base64 is reported, never raised.
    pub fn preview(&self) -> Preview {
        let Some(content_type) = self.content_type.as_deref() else {
            return Preview::Unavailable;
        };
        if !is_previewable(content_type) {
            return Preview::Unavailable;
        }

        if !self.is_base64 {
            return Preview::Text {
                content_type: content_type.to_string(),
                text: self.raw_body.clone(),
            };
        }

        match base64::engine::general_purpose::STANDARD.decode(self.raw_body.trim()) {
            Ok(bytes) => Preview::Binary {
                content_type: content_type.to_string(),
                bytes,
            },
            Err(e) => Preview::DecodeFailed {
                message: format!("Failed to decode response body: {}", e),
            },
        }
    }
}

pub fn is_previewable(content_type: &str) -> bool {
    let ct = content_type.to_lowercase();
    ct.starts_with("image/") || PREVIEW_TYPES.iter().any(|t| ct.contains(t))
}

/// What the response panel can render for a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// No content type, or one that is not rendered.
    Unavailable,
    Text { content_type: String, text: String },
    Binary { content_type: String, bytes: Vec<u8> },
    /// The base64 payload could not be decoded.
    DecodeFailed { message: String },
}
