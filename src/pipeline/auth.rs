//! Derives auth headers and query params for the outbound working copy.

use base64::Engine;

use crate::model::{ApiKeyLocation, AuthConfig, KeyValue};

const AUTHORIZATION: &str = "Authorization";

/// Working copy of the rows after auth injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthApplied {
    pub headers: Vec<KeyValue>,
    pub query_params: Vec<KeyValue>,
}

/// Returns new header and param rows with `auth` applied.
///
/// Any existing `Authorization` header (any case) is dropped first, so the
/// result never carries a stale or duplicated credential.
pub fn apply_auth(headers: &[KeyValue], query_params: &[KeyValue], auth: &AuthConfig) -> AuthApplied {
    let mut headers: Vec<KeyValue> = headers
        .iter()
        .filter(|h| !h.key.eq_ignore_ascii_case(AUTHORIZATION))
        .cloned()
        .collect();
    let mut query_params = query_params.to_vec();

    match auth {
        AuthConfig::None => {}
        AuthConfig::Bearer { token } => {
            if !token.is_empty() {
                headers.push(KeyValue::new(AUTHORIZATION, format!("Bearer {}", token)));
            }
        }
        AuthConfig::ApiKey {
            key,
            value,
            location,
        } => {
            if !key.is_empty() && !value.is_empty() {
                let row = KeyValue::new(key.clone(), value.clone());
                match location {
                    ApiKeyLocation::Header => headers.push(row),
                    ApiKeyLocation::Query => query_params.push(row),
                }
            }
        }
        AuthConfig::Basic { username, password } => {
            if !username.is_empty() {
                let credentials = format!("{}:{}", username, password.as_deref().unwrap_or(""));
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                headers.push(KeyValue::new(AUTHORIZATION, format!("Basic {}", encoded)));
            }
        }
    }

    AuthApplied {
        headers,
        query_params,
    }
}
