//! Connection settings for [`DelugeWebClient`](crate::DelugeWebClient).

use std::{env, fmt, time::Duration};

use tracing::warn;

/// Endpoint of a Deluge Web UI running with its default settings.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8112/json";

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings used to connect and log in.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL of the JSON-RPC endpoint, usually ending in `/json`.
    pub endpoint: String,
    /// Web UI password.
    pub password: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from `DELUGE_WEB_URL`, `DELUGE_WEB_PASSWORD` and
    /// `DELUGE_WEB_TIMEOUT_SECS`, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: lookup("DELUGE_WEB_URL").unwrap_or(defaults.endpoint),
            password: lookup("DELUGE_WEB_PASSWORD").unwrap_or(defaults.password),
            timeout: lookup("DELUGE_WEB_TIMEOUT_SECS")
                .and_then(|secs| parse_timeout(&secs))
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Parses a timeout in whole seconds, warning about values that are not one.
fn parse_timeout(secs: &str) -> Option<Duration> {
    match secs.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            warn!(
                "Ignoring DELUGE_WEB_TIMEOUT_SECS={secs:?} ({e}), using {}s",
                DEFAULT_TIMEOUT.as_secs()
            );
            None
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        write!(
            f,
            "ClientConfig(endpoint=\"{}\", password=<{}>, timeout={:?})",
            self.endpoint,
            if self.password.is_empty() {
                "unset"
            } else {
                "set"
            },
            self.timeout,
        )
    }
}
