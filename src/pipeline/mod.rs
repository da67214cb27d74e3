//! Turns a tab into the single outbound request sent through the proxy.
//!
//! [`prepare`] runs the stages in a fixed order:
//!
//! 1. auth injection into a working copy of headers and params
//! 2. variable substitution into URL, body, header and param values
//! 3. JSON validation of the substituted body for mutating methods
//! 4. assembly of the final URL and header map
//!
//! Auth runs before substitution so that injected values such as a bearer
//! token may themselves hold placeholders. The tab is never modified.

pub mod assemble;
pub mod auth;
pub mod variables;

pub use assemble::{build_header_map, build_url};
pub use auth::{apply_auth, AuthApplied};
pub use variables::{substitute, substitute_values};

use std::collections::HashMap;

use crate::error::ClientError;
use crate::model::{HttpMethod, RequestTab};

/// The fully processed request, ready for the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    /// Present only for mutating methods with a non-empty body.
    pub body: Option<String>,
}

pub fn prepare(
    tab: &RequestTab,
    variables: &HashMap<String, String>,
) -> Result<PreparedRequest, ClientError> {
    let working = apply_auth(&tab.headers, &tab.query_params, &tab.auth.active());

    let url = substitute(&tab.url, variables);
    let body = substitute(&tab.body, variables);
    let headers = substitute_values(&working.headers, variables);
    let query_params = substitute_values(&working.query_params, variables);

    let body = if tab.method.is_mutating() && !body.is_empty() {
        validate_json(&body)?;
        Some(body)
    } else {
        None
    };

    Ok(PreparedRequest {
        method: tab.method,
        url: build_url(&url, &query_params),
        headers: build_header_map(&headers),
        body,
    })
}

fn validate_json(body: &str) -> Result<(), ClientError> {
    serde_json::from_str::<serde_json::Value>(body)
        .map(|_| ())
        .map_err(|e| ClientError::InvalidJsonBody(e.to_string()))
}
