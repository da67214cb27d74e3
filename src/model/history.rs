//! Request history contract and the in-memory store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

use super::tab::HttpMethod;

/// Entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub url: String,
    pub method: HttpMethod,
    pub name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Fields supplied by the caller; id and timestamp are assigned on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryItem {
    pub url: String,
    pub method: HttpMethod,
    pub name: String,
}

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History store unavailable: {0}")]
    Unavailable(String),
}

pub trait HistoryStore: Send + Sync {
    fn append(&self, item: NewHistoryItem) -> Result<HistoryItem, HistoryError>;

    /// Entries ordered newest first.
    fn list(&self) -> Result<Vec<HistoryItem>, HistoryError>;

    fn clear(&self) -> Result<(), HistoryError>;
}

pub struct InMemoryHistory {
    limit: usize,
    items: Mutex<VecDeque<HistoryItem>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            items: Mutex::new(VecDeque::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<HistoryItem>>, HistoryError> {
        self.items
            .lock()
            .map_err(|e| HistoryError::Unavailable(e.to_string()))
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&self, item: NewHistoryItem) -> Result<HistoryItem, HistoryError> {
        let entry = HistoryItem {
            id: Uuid::new_v4().to_string(),
            url: item.url,
            method: item.method,
            name: item.name,
            timestamp: Utc::now().timestamp_millis(),
        };

        let mut items = self.lock()?;
        items.push_front(entry.clone());
        items.truncate(self.limit);
        Ok(entry)
    }

    fn list(&self) -> Result<Vec<HistoryItem>, HistoryError> {
        Ok(self.lock()?.iter().cloned().collect())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.lock()?.clear();
        Ok(())
    }
}
