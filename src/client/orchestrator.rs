//! Per-tab send orchestration.
//!
//! One call to [`RequestExecutor::send`] moves a tab through
//! `idle/settled -> sending -> settled`. The tab is snapshotted on entry and
//! the outcome is committed back by id, so the workspace lock is never held
//! across the proxy call. Every path ends with the tab out of `Sending`,
//! including a send future that is dropped before it settles.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::interpreter::interpret;
use super::proxy_client::ProxyClient;
use crate::error::ClientError;
use crate::model::{
    HistoryStore, NewHistoryItem, RequestTab, ResponseData, SendState, VariableSource, Workspace,
};
use crate::pipeline::prepare;
use crate::proxy::ProxyEnvelope;

/// Reports whether a signed-in user context exists. Queried synchronously
/// when a send succeeds, to decide whether history is recorded.
pub trait SessionProbe: Send + Sync {
    fn is_signed_in(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSession(pub bool);

impl SessionProbe for StaticSession {
    fn is_signed_in(&self) -> bool {
        self.0
    }
}

/// Settled result of one send.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Success(ResponseData),
    Error(ResponseData),
}

impl SendOutcome {
    pub fn response(&self) -> &ResponseData {
        match self {
            SendOutcome::Success(data) | SendOutcome::Error(data) => data,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Success(_))
    }
}

pub struct RequestExecutor {
    proxy: Arc<dyn ProxyClient>,
    variables: Arc<dyn VariableSource>,
    history: Arc<dyn HistoryStore>,
    session: Arc<dyn SessionProbe>,
}

impl RequestExecutor {
    pub fn new(
        proxy: Arc<dyn ProxyClient>,
        variables: Arc<dyn VariableSource>,
        history: Arc<dyn HistoryStore>,
        session: Arc<dyn SessionProbe>,
    ) -> Self {
        Self {
            proxy,
            variables,
            history,
            session,
        }
    }

    /// Sends the tab's request and commits the outcome to the tab.
    ///
    /// Returns `None` when the tab does not exist or already has a send in
    /// flight. A tab closed mid-flight still yields its outcome; only the
    /// commit is skipped.
    pub async fn send(&self, workspace: &Workspace, tab_id: &str) -> Option<SendOutcome> {
        let snapshot = workspace
            .with_tab_mut(tab_id, |tab| {
                if tab.loading() {
                    return None;
                }
                tab.response = None;
                tab.state = SendState::Sending;
                tab.is_dirty = false;
                Some(tab.clone())
            })
            .await
            .flatten();

        let Some(snapshot) = snapshot else {
            tracing::debug!(tab = %tab_id, "Send ignored: tab missing or already sending");
            return None;
        };
        let guard = workspace.sending_guard(tab_id);

        let started = Instant::now();
        let variables = self.variables.active_variables();
        let result = self.execute(&snapshot, &variables).await;
        let elapsed = started.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(envelope) => SendOutcome::Success(interpret(envelope, elapsed)),
            Err(error) => {
                tracing::warn!(tab = %tab_id, %error, "Send failed");
                SendOutcome::Error(error.into_response_data(elapsed))
            }
        };

        let derived_name = snapshot
            .has_default_name()
            .then(|| snapshot.derived_name());

        if outcome.is_success() {
            self.record_history(&snapshot, derived_name.as_deref());
        }

        let committed = workspace
            .with_tab_mut(tab_id, |tab| {
                tab.response = Some(outcome.response().clone());
                if outcome.is_success() {
                    tab.state = SendState::Succeeded;
                    tab.is_dirty = false;
                    if let Some(name) = derived_name.as_ref().filter(|_| tab.has_default_name()) {
                        tab.name = name.clone();
                    }
                } else {
                    tab.state = SendState::Failed;
                }
            })
            .await;
        guard.disarm();

        if committed.is_none() {
            tracing::debug!(tab = %tab_id, "Tab closed before send settled; result dropped");
        }

        Some(outcome)
    }

    async fn execute(
        &self,
        tab: &RequestTab,
        variables: &HashMap<String, String>,
    ) -> Result<ProxyEnvelope, ClientError> {
        let prepared = prepare(tab, variables)?;

        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            "Dispatching to proxy"
        );

        self.proxy.send(prepared.into()).await
    }

    fn record_history(&self, tab: &RequestTab, derived_name: Option<&str>) {
        if !self.session.is_signed_in() {
            return;
        }

        let item = NewHistoryItem {
            url: tab.url.clone(),
            method: tab.method,
            name: derived_name.unwrap_or(&tab.name).to_string(),
        };
        if let Err(error) = self.history.append(item) {
            tracing::warn!(%error, "Failed to record history entry");
        }
    }
}
