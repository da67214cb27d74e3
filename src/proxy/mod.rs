pub mod executor;
pub mod response_builder;
pub mod service;
pub mod types;

pub use executor::{build_client, execute_request};
pub use response_builder::{build_envelope, is_text_content};
pub use service::{HttpProxyService, ProxyService};
pub use types::*;
