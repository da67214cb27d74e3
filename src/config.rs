use std::env;

/// Default number of redirect hops the proxy follows.
const DEFAULT_MAX_REDIRECTS: usize = 10;

pub struct Config {
    pub port: u16,
    pub frontend_path: Option<String>,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            frontend_path: env::var("FRONTEND_PATH").ok().filter(|p| !p.is_empty()),
            max_redirects: env::var("PROXY_MAX_REDIRECTS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_MAX_REDIRECTS),
            user_agent: env::var("PROXY_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            frontend_path: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("http-workbench/{}", env!("CARGO_PKG_VERSION"))
}
