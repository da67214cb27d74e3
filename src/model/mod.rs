//! Data model shared by the request pipeline and the orchestrator.
//!
//! Tabs, auth, responses, plus the contracts of the history and environment
//! stores the core consumes.

pub mod auth;
pub mod environment;
pub mod history;
pub mod response;
pub mod tab;

pub use auth::{ApiKeyFields, ApiKeyLocation, AuthConfig, AuthKind, AuthState, BasicFields};
pub use environment::{Environment, InMemoryEnvironments, VariableSource};
pub use history::{HistoryError, HistoryItem, HistoryStore, InMemoryHistory, NewHistoryItem};
pub use response::{is_previewable, Preview, ResponseData};
pub use tab::{HttpMethod, KeyValue, RequestTab, SendState, Workspace, UNTITLED};
