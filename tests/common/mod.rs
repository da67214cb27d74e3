#![allow(dead_code)]

use axum::{
    body::Bytes,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect},
    routing::{any, get},
    Json, Router,
};
use http_workbench_app::{
    config::Config,
    proxy::HttpProxyService,
    routes::{self, AppState},
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral loopback port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn proxy_app() -> Router {
    let state = AppState {
        proxy: HttpProxyService::arc(&Config::default()).unwrap(),
    };
    routes::router(state, None)
}

/// A target server with a handful of canned endpoints.
pub fn upstream_app() -> Router {
    Router::new()
        .route("/json", get(|| async { Json(json!({"a": 1})) }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "nope"}))) }),
        )
        .route(
            "/image",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "image/png")],
                    vec![0x89u8, b'P', b'N', b'G'],
                )
            }),
        )
        .route("/plain", get(|| async { "hello" }))
        .route("/redirect", get(|| async { Redirect::temporary("/json") }))
        .route("/echo", any(echo))
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let headers: Map<String, Value> = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                Value::String(v.to_str().unwrap_or("").to_string()),
            )
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}
