//! Request tabs and the tab set they live in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::auth::AuthState;
use super::history::HistoryItem;
use super::response::ResponseData;

/// Name given to new tabs until the first successful send renames them.
pub const UNTITLED: &str = "Untitled Request";

/// Characters of the scheme-less URL kept in a derived tab name.
const NAME_URL_CHARS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Methods whose body is validated and forwarded.
    pub fn is_mutating(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("Unsupported method: {}", other)),
        }
    }
}

/// One header or query-param row. Rows with an empty key are inert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub id: String,
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Where a tab is in its send lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SendState {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTab {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub query_params: Vec<KeyValue>,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub auth: AuthState,
    #[serde(default)]
    pub response: Option<ResponseData>,
    #[serde(default)]
    pub state: SendState,
    #[serde(default)]
    pub is_dirty: bool,
}

impl RequestTab {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: UNTITLED.to_string(),
            method: HttpMethod::Get,
            url: String::new(),
            query_params: Vec::new(),
            headers: Vec::new(),
            body: String::new(),
            auth: AuthState::default(),
            response: None,
            state: SendState::Idle,
            is_dirty: false,
        }
    }

    pub fn from_history(item: &HistoryItem) -> Self {
        Self {
            name: item.name.clone(),
            method: item.method,
            url: item.url.clone(),
            ..Self::new()
        }
    }

    pub fn loading(&self) -> bool {
        self.state == SendState::Sending
    }

    pub fn has_default_name(&self) -> bool {
        self.name == UNTITLED
    }

    /// Name derived from method and URL, e.g. `GET api.example.com/users/1...`.
    pub fn derived_name(&self) -> String {
        let url = self.url.as_str();
        let without_scheme = ["https://", "http://"]
            .iter()
            .find_map(|scheme| {
                url.get(..scheme.len())
                    .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
                    .map(|_| &url[scheme.len()..])
            })
            .unwrap_or(url);
        let short: String = without_scheme.chars().take(NAME_URL_CHARS).collect();
        format!("{} {}...", self.method, short)
    }
}

impl Default for RequestTab {
    fn default() -> Self {
        Self::new()
    }
}

struct TabSet {
    tabs: Vec<RequestTab>,
    active: String,
}

impl TabSet {
    fn abandon_send(&mut self, id: &str) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id && t.loading()) {
            tab.state = SendState::Failed;
        }
    }
}

/// The open tabs. Always holds at least one tab.
pub struct Workspace {
    inner: Arc<RwLock<TabSet>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_tab(RequestTab::new())
    }

    pub fn with_tab(tab: RequestTab) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TabSet {
                active: tab.id.clone(),
                tabs: vec![tab],
            })),
        }
    }

    pub async fn tabs(&self) -> Vec<RequestTab> {
        self.inner.read().await.tabs.clone()
    }

    pub async fn get(&self, id: &str) -> Option<RequestTab> {
        let set = self.inner.read().await;
        set.tabs.iter().find(|t| t.id == id).cloned()
    }

    pub async fn active_id(&self) -> String {
        self.inner.read().await.active.clone()
    }

    pub async fn set_active(&self, id: &str) -> bool {
        let mut set = self.inner.write().await;
        if set.tabs.iter().any(|t| t.id == id) {
            set.active = id.to_string();
            true
        } else {
            false
        }
    }

    /// Opens a tab and makes it active.
    pub async fn open(&self, tab: RequestTab) -> String {
        let id = tab.id.clone();
        let mut set = self.inner.write().await;
        set.tabs.push(tab);
        set.active = id.clone();
        id
    }

    pub async fn open_blank(&self) -> String {
        self.open(RequestTab::new()).await
    }

    pub async fn open_from_history(&self, item: &HistoryItem) -> String {
        self.open(RequestTab::from_history(item)).await
    }

    /// Closes a tab. Closing the last tab leaves a fresh blank one behind.
    pub async fn close(&self, id: &str) -> bool {
        let mut set = self.inner.write().await;
        let Some(index) = set.tabs.iter().position(|t| t.id == id) else {
            return false;
        };
        set.tabs.remove(index);

        if set.tabs.is_empty() {
            let blank = RequestTab::new();
            set.active = blank.id.clone();
            set.tabs.push(blank);
        } else if set.active == id {
            let next = index.min(set.tabs.len() - 1);
            set.active = set.tabs[next].id.clone();
        }
        true
    }

    /// Applies a field edit. The tab becomes dirty unless `mark_dirty` says otherwise.
    pub async fn update<F>(&self, id: &str, mark_dirty: Option<bool>, edit: F) -> bool
    where
        F: FnOnce(&mut RequestTab),
    {
        self.with_tab_mut(id, |tab| {
            edit(tab);
            tab.is_dirty = mark_dirty.unwrap_or(true);
        })
        .await
        .is_some()
    }

    pub async fn mark_saved(&self, id: &str) -> bool {
        self.with_tab_mut(id, |tab| tab.is_dirty = false)
            .await
            .is_some()
    }

    pub(crate) async fn with_tab_mut<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut RequestTab) -> R,
    {
        let mut set = self.inner.write().await;
        set.tabs.iter_mut().find(|t| t.id == id).map(f)
    }

    /// Guard for a tab that was just put in `Sending`.
    pub(crate) fn sending_guard(&self, id: &str) -> SendingGuard {
        SendingGuard {
            tabs: Arc::clone(&self.inner),
            id: id.to_string(),
            armed: true,
        }
    }
}

/// Moves a tab from `Sending` to `Failed` when dropped while armed, so a send
/// that is cancelled or panics never leaves the tab loading.
pub(crate) struct SendingGuard {
    tabs: Arc<RwLock<TabSet>>,
    id: String,
    armed: bool,
}

impl SendingGuard {
    /// Called once the outcome has been committed.
    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        if let Ok(mut set) = self.tabs.try_write() {
            set.abandon_send(&self.id);
            return;
        }

        // Lock is busy: settle from a task instead of blocking in drop.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let tabs = Arc::clone(&self.tabs);
            let id = std::mem::take(&mut self.id);
            handle.spawn(async move {
                tabs.write().await.abandon_send(&id);
            });
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
