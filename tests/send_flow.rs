mod common;

use http_workbench_app::{
    client::{HttpProxyClient, RequestExecutor, SendOutcome, StaticSession},
    model::{
        ApiKeyLocation, AuthConfig, AuthState, Environment, HistoryStore, HttpMethod,
        InMemoryEnvironments, InMemoryHistory, Preview, RequestTab, SendState, Workspace,
    },
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

struct Harness {
    upstream: String,
    executor: RequestExecutor,
    environments: Arc<InMemoryEnvironments>,
    history: Arc<InMemoryHistory>,
}

async fn harness() -> Harness {
    let upstream = common::spawn(common::upstream_app()).await;
    let proxy = common::spawn(common::proxy_app()).await;
    harness_with_proxy(upstream, &proxy)
}

fn harness_with_proxy(upstream: String, proxy_base: &str) -> Harness {
    let environments = Arc::new(InMemoryEnvironments::new());
    let history = Arc::new(InMemoryHistory::new());
    let executor = RequestExecutor::new(
        Arc::new(HttpProxyClient::new(proxy_base).unwrap()),
        environments.clone(),
        history.clone(),
        Arc::new(StaticSession(true)),
    );
    Harness {
        upstream,
        executor,
        environments,
        history,
    }
}

async fn send(harness: &Harness, tab: RequestTab) -> (SendOutcome, RequestTab) {
    let id = tab.id.clone();
    let workspace = Workspace::with_tab(tab);
    let outcome = harness.executor.send(&workspace, &id).await.unwrap();
    let tab = workspace.get(&id).await.unwrap();
    (outcome, tab)
}

#[tokio::test]
async fn upstream_404_settles_as_success() {
    let harness = harness().await;
    let mut tab = RequestTab::new();
    tab.url = format!("{}/missing", harness.upstream);

    let (outcome, tab) = send(&harness, tab).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.response().status, 404);
    assert_eq!(tab.state, SendState::Succeeded);
    assert!(tab.name.starts_with("GET 127.0.0.1:"));
    assert!(tab.name.ends_with("..."));
    assert_eq!(harness.history.list().unwrap().len(), 1);
}

#[tokio::test]
async fn json_responses_are_pretty_printed() {
    let harness = harness().await;
    let mut tab = RequestTab::new();
    tab.url = format!("{}/json", harness.upstream);

    let (outcome, _) = send(&harness, tab).await;
    let response = outcome.response();
    assert_eq!(response.body, "{\n  \"a\": 1\n}");
    assert_eq!(response.raw_body, r#"{"a":1}"#);
    assert!(!response.can_preview());
}

#[tokio::test]
async fn api_key_in_query_reaches_target() {
    let harness = harness().await;
    let mut tab = RequestTab::new();
    tab.url = format!("{}/echo", harness.upstream);
    tab.auth = AuthState::from(AuthConfig::ApiKey {
        key: "X-Key".into(),
        value: "secret".into(),
        location: ApiKeyLocation::Query,
    });

    let (outcome, _) = send(&harness, tab).await;
    let echoed: Value = serde_json::from_str(&outcome.response().raw_body).unwrap();
    assert_eq!(echoed["uri"], "/echo?X-Key=secret");
}

#[tokio::test]
async fn environment_variables_resolve_before_dispatch() {
    let harness = harness().await;
    let environment = Environment::new(
        "local",
        HashMap::from([
            ("base".to_string(), harness.upstream.clone()),
            ("token".to_string(), "t-123".to_string()),
            ("name".to_string(), "\"workbench\"".to_string()),
        ]),
    );
    let id = environment.id.clone();
    harness.environments.upsert(environment);
    harness.environments.set_active(Some(&id));

    let mut tab = RequestTab::new();
    tab.method = HttpMethod::Post;
    tab.url = "{{base}}/echo".into();
    tab.body = r#"{"name": {{name}}}"#.into();
    tab.auth = AuthState::from(AuthConfig::Bearer {
        token: "{{token}}".into(),
    });

    let (outcome, tab) = send(&harness, tab).await;
    let echoed: Value = serde_json::from_str(&outcome.response().raw_body).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["body"], r#"{"name": "workbench"}"#);
    assert_eq!(echoed["headers"]["authorization"], "Bearer t-123");
    assert_eq!(tab.url, "{{base}}/echo");
}

#[tokio::test]
async fn invalid_json_body_fails_locally() {
    let harness = harness().await;
    let environment = Environment::new(
        "local",
        HashMap::from([("token".to_string(), "abc".to_string())]),
    );
    let id = environment.id.clone();
    harness.environments.upsert(environment);
    harness.environments.set_active(Some(&id));

    let mut tab = RequestTab::new();
    tab.method = HttpMethod::Post;
    tab.url = format!("{}/echo", harness.upstream);
    tab.body = "{{token}}".into();

    let (outcome, tab) = send(&harness, tab).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.response().status, 0);
    assert_eq!(outcome.response().status_text, "Client Error");
    assert_eq!(tab.state, SendState::Failed);
    assert!(harness.history.list().unwrap().is_empty());
}

#[tokio::test]
async fn binary_responses_preview_as_bytes() {
    let harness = harness().await;
    let mut tab = RequestTab::new();
    tab.url = format!("{}/image", harness.upstream);

    let (outcome, _) = send(&harness, tab).await;
    let response = outcome.response();
    assert!(response.is_base64);
    assert!(response.can_preview());
    assert_eq!(
        response.preview(),
        Preview::Binary {
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    );
}

#[tokio::test]
async fn proxy_side_failure_keeps_default_status() {
    let harness = harness().await;
    let mut tab = RequestTab::new();
    tab.url = "http://127.0.0.1:1/".into();

    let (outcome, tab) = send(&harness, tab).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.response().status, 500);
    assert_eq!(outcome.response().status_text, "Proxy Error");
    assert!(!tab.loading());
}

#[tokio::test]
async fn unreachable_proxy_is_transport_error() {
    let upstream = common::spawn(common::upstream_app()).await;
    let harness = harness_with_proxy(upstream, "http://127.0.0.1:1");
    let mut tab = RequestTab::new();
    tab.url = format!("{}/json", harness.upstream);

    let (outcome, tab) = send(&harness, tab).await;
    assert_eq!(outcome.response().status, 0);
    assert_eq!(tab.state, SendState::Failed);
    assert_eq!(tab.response.as_ref(), Some(outcome.response()));
}
