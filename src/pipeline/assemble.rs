//! Final URL and header map for the proxy call.

use std::collections::HashMap;
use url::form_urlencoded;

use crate::model::KeyValue;

/// Appends the active params to `url` as an encoded query string.
///
/// An existing query string is kept verbatim and joined with `&`; no
/// re-encoding or de-duplication takes place.
pub fn build_url(url: &str, query_params: &[KeyValue]) -> String {
    let mut active = query_params.iter().filter(|p| p.is_active()).peekable();
    if active.peek().is_none() {
        return url.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(active.map(|p| (p.key.as_str(), p.value.as_str())))
        .finish();

    if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}

/// Collects active headers into a map; later rows win on equal keys.
pub fn build_header_map(headers: &[KeyValue]) -> HashMap<String, String> {
    headers
        .iter()
        .filter(|h| h.is_active())
        .map(|h| (h.key.clone(), h.value.clone()))
        .collect()
}
