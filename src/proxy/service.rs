//! Proxy service abstraction layer.
//!
//! The route handler talks to a [`ProxyService`] so that tests can swap in
//! a canned implementation.

use super::executor::{build_client, execute_request};
use super::types::{ProxyEnvelope, ProxyRequest};
use crate::config::Config;
use crate::error::AppError;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Trait for proxy services that execute HTTP requests.
pub trait ProxyService: Send + Sync {
    /// Executes a proxy request and returns the envelope or the failure.
    fn execute(
        &self,
        request: ProxyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProxyEnvelope, AppError>> + Send + '_>>;
}

/// Default HTTP proxy service backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpProxyService {
    client: Client,
}

impl HttpProxyService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    /// Creates a new `HttpProxyService` wrapped in an `Arc`.
    pub fn arc(config: &Config) -> Result<Arc<Self>, AppError> {
        Self::new(config).map(Arc::new)
    }
}

impl ProxyService for HttpProxyService {
    fn execute(
        &self,
        request: ProxyRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProxyEnvelope, AppError>> + Send + '_>> {
        Box::pin(execute_request(&self.client, request))
    }
}
