//! Browser-side half of the workbench: the proxy client, the response
//! interpreter and the per-send orchestrator.

pub mod interpreter;
pub mod orchestrator;
pub mod proxy_client;

pub use interpreter::{interpret, is_json_content};
pub use orchestrator::{RequestExecutor, SendOutcome, SessionProbe, StaticSession};
pub use proxy_client::{read_envelope, HttpProxyClient, ProxyClient};
