pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod proxy;
pub mod routes;

pub use client::{HttpProxyClient, ProxyClient, RequestExecutor, SendOutcome};
pub use config::Config;
pub use error::{AppError, ClientError};
pub use model::{AuthConfig, AuthState, HttpMethod, RequestTab, ResponseData, Workspace};
pub use proxy::{HttpProxyService, ProxyEnvelope, ProxyRequest, ProxyService};
