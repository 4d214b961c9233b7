use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variables consulted for the base URL, in order.
pub const BASE_URL_VARS: &[&str] = &["MENU_API_URL", "API_URL", "BACKEND_URL"];

pub const TIMEOUT_VAR: &str = "MENU_API_TIMEOUT_SECS";

/// Where the menu API lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Opaque base URL; only ever joined with request paths.
    pub base_url: String,
    /// `None` leaves timeouts to the transport's defaults.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = BASE_URL_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = lookup(TIMEOUT_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                tracing::warn!(var = TIMEOUT_VAR, value = %raw, "ignoring invalid timeout");
                None
            }
        });

        Self { base_url, timeout }
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    pub fn join(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
