//! Environments and the read-only variable snapshot handed to a send.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl Environment {
    pub fn new(name: impl Into<String>, variables: HashMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            variables,
        }
    }
}

/// Supplies the active environment's variables at send time.
pub trait VariableSource: Send + Sync {
    /// A snapshot; later edits do not affect a send already in flight.
    fn active_variables(&self) -> HashMap<String, String>;
}

impl VariableSource for HashMap<String, String> {
    fn active_variables(&self) -> HashMap<String, String> {
        self.clone()
    }
}

#[derive(Default)]
struct EnvironmentSet {
    environments: Vec<Environment>,
    active: Option<String>,
}

#[derive(Default)]
pub struct InMemoryEnvironments {
    inner: RwLock<EnvironmentSet>,
}

impl InMemoryEnvironments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an environment by id.
    pub fn upsert(&self, environment: Environment) {
        if let Ok(mut set) = self.inner.write() {
            match set.environments.iter_mut().find(|e| e.id == environment.id) {
                Some(existing) => *existing = environment,
                None => set.environments.push(environment),
            }
        }
    }

    pub fn remove(&self, id: &str) {
        if let Ok(mut set) = self.inner.write() {
            set.environments.retain(|e| e.id != id);
            if set.active.as_deref() == Some(id) {
                set.active = None;
            }
        }
    }

    /// Selects the active environment; `None` deactivates.
    pub fn set_active(&self, id: Option<&str>) -> bool {
        let Ok(mut set) = self.inner.write() else {
            return false;
        };
        match id {
            Some(id) if !set.environments.iter().any(|e| e.id == id) => false,
            _ => {
                set.active = id.map(str::to_string);
                true
            }
        }
    }

    pub fn active(&self) -> Option<Environment> {
        let set = self.inner.read().ok()?;
        let id = set.active.as_ref()?;
        set.environments.iter().find(|e| &e.id == id).cloned()
    }

    pub fn list(&self) -> Vec<Environment> {
        self.inner
            .read()
            .map(|set| set.environments.clone())
            .unwrap_or_default()
    }
}

impl VariableSource for InMemoryEnvironments {
    fn active_variables(&self) -> HashMap<String, String> {
        self.active().map(|e| e.variables).unwrap_or_default()
    }
}
