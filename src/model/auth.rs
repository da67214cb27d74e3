//! Authentication configuration attached to a request tab.

use serde::{Deserialize, Serialize};

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

/// The auth variant in effect for one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthConfig {
    #[default]
    None,
    Bearer {
        token: String,
    },
    ApiKey {
        key: String,
        value: String,
        #[serde(rename = "in", default)]
        location: ApiKeyLocation,
    },
    Basic {
        username: String,
        #[serde(default)]
        password: Option<String>,
    },
}

impl AuthConfig {
    pub fn kind(&self) -> AuthKind {
        match self {
            AuthConfig::None => AuthKind::None,
            AuthConfig::Bearer { .. } => AuthKind::Bearer,
            AuthConfig::ApiKey { .. } => AuthKind::ApiKey,
            AuthConfig::Basic { .. } => AuthKind::Basic,
        }
    }
}

/// Discriminant of [`AuthConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AuthKind {
    #[default]
    None,
    Bearer,
    ApiKey,
    Basic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiKeyFields {
    pub key: String,
    pub value: String,
    #[serde(rename = "in", default)]
    pub location: ApiKeyLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BasicFields {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Editable auth state of a tab.
///
/// Holds the fields of every variant; only `kind` decides which one is sent.
/// Switching kinds leaves the other variants' input in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub kind: AuthKind,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub api_key: ApiKeyFields,
    #[serde(default)]
    pub basic: BasicFields,
}

impl AuthState {
    pub fn set_kind(&mut self, kind: AuthKind) {
        self.kind = kind;
    }

    /// The variant that takes part in the next send.
    pub fn active(&self) -> AuthConfig {
        match self.kind {
            AuthKind::None => AuthConfig::None,
            AuthKind::Bearer => AuthConfig::Bearer {
                token: self.token.clone(),
            },
            AuthKind::ApiKey => AuthConfig::ApiKey {
                key: self.api_key.key.clone(),
                value: self.api_key.value.clone(),
                location: self.api_key.location,
            },
            AuthKind::Basic => AuthConfig::Basic {
                username: self.basic.username.clone(),
                password: self.basic.password.clone(),
            },
        }
    }
}

impl From<AuthConfig> for AuthState {
    fn from(config: AuthConfig) -> Self {
        let mut state = AuthState {
            kind: config.kind(),
            ..Default::default()
        };
        match config {
            AuthConfig::None => {}
            AuthConfig::Bearer { token } => state.token = token,
            AuthConfig::ApiKey {
                key,
                value,
                location,
            } => {
                state.api_key = ApiKeyFields {
                    key,
                    value,
                    location,
                }
            }
            AuthConfig::Basic { username, password } => {
                state.basic = BasicFields { username, password }
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_kind_keeps_other_fields() {
        let mut state = AuthState::from(AuthConfig::Bearer {
            token: "t0k".into(),
        });
        state.set_kind(AuthKind::Basic);
        state.basic.username = "alice".into();
        assert_eq!(
            state.active(),
            AuthConfig::Basic {
                username: "alice".into(),
                password: None
            }
        );

        state.set_kind(AuthKind::Bearer);
        assert_eq!(
            state.active(),
            AuthConfig::Bearer {
                token: "t0k".into()
            }
        );
    }

    #[test]
    fn test_api_key_wire_format() {
        let config: AuthConfig = serde_json::from_str(
            r#"{"type":"apiKey","key":"X-Key","value":"secret","in":"query"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            AuthConfig::ApiKey {
                key: "X-Key".into(),
                value: "secret".into(),
                location: ApiKeyLocation::Query,
            }
        );

        let defaulted: AuthConfig =
            serde_json::from_str(r#"{"type":"apiKey","key":"k","value":"v"}"#).unwrap();
        assert!(matches!(
            defaulted,
            AuthConfig::ApiKey {
                location: ApiKeyLocation::Header,
                ..
            }
        ));
    }
}
