//! HTTP surface of the workbench backend.

pub mod health;
pub mod proxy;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::proxy::ProxyService;

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<dyn ProxyService>,
}

/// Builds the router. Built browser assets under `frontend_path`, when
/// given, are served on the same origin as the proxy.
pub fn router(state: AppState, frontend_path: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/proxy", post(proxy::proxy_request))
        .with_state(state);

    let app = match frontend_path {
        Some(path) => api.fallback_service(ServeDir::new(path)),
        None => api,
    };

    app.layer(cors).layer(TraceLayer::new_for_http())
}
