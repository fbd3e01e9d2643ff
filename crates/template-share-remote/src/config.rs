use serde::{Deserialize, Serialize};

use crate::client::ServerError;

/// The shared public server every install starts with. Its key only
/// authorizes list and download; upload and delete are refused locally
/// while this configuration is active.
pub const DEFAULT_SERVER_URL: &str = "https://templates.wepie.dev";
pub const DEFAULT_API_KEY: &str = "public-read-only";

const DEFAULT_ADVISORY: &str = "You are using the shared public template server, which is \
read-only. Deploy a private template server and set its URL and API key with `config set` \
to share templates of your own.";

/// Where the client talks to, and with which credential.
///
/// Threaded explicitly into `ServerClient` rather than read from ambient
/// state. The caller that owns persistence (the CLI) saves it back after
/// mutations, including the advisory flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub api_key: String,
    /// Whether the read-only advisory for the default configuration has
    /// already been surfaced in this configuration's lifetime.
    #[serde(default)]
    pub default_advisory_shown: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            api_key: DEFAULT_API_KEY.to_owned(),
            default_advisory_shown: false,
        }
    }
}

impl ServerConfig {
    pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_key: api_key.into(),
            default_advisory_shown: false,
        }
    }

    pub fn is_default(&self) -> bool {
        self.server_url == DEFAULT_SERVER_URL && self.api_key == DEFAULT_API_KEY
    }

    /// Reject blank values before any request is attempted.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.server_url.trim().is_empty() || self.api_key.trim().is_empty() {
            return Err(ServerError::MissingConfig);
        }
        Ok(())
    }

    /// Replace both values and reset the advisory flag, so a later return
    /// to the default configuration warns again.
    pub fn update(&mut self, server_url: impl Into<String>, api_key: impl Into<String>) {
        self.server_url = server_url.into();
        self.api_key = api_key.into();
        self.default_advisory_shown = false;
    }

    /// The read-only advisory, at most once per configuration lifetime.
    /// Returns `Some` only the first time it is called while the default
    /// configuration is active; the caller should persist the flag.
    pub fn take_default_advisory(&mut self) -> Option<&'static str> {
        if self.is_default() && !self.default_advisory_shown {
            self.default_advisory_shown = true;
            Some(DEFAULT_ADVISORY)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_default_is_recognized() {
        assert!(ServerConfig::default().is_default());
        assert!(!ServerConfig::new("https://templates.internal", "k").is_default());
    }

    #[test]
    fn validate_rejects_blank_values() {
        assert!(ServerConfig::new("", "key").validate().is_err());
        assert!(ServerConfig::new("https://x", "  ").validate().is_err());
        assert!(ServerConfig::new("https://x", "key").validate().is_ok());
    }

    #[test]
    fn advisory_fires_exactly_once() {
        let mut config = ServerConfig::default();
        assert!(config.take_default_advisory().is_some());
        assert!(config.take_default_advisory().is_none());
        assert!(config.take_default_advisory().is_none());
    }

    #[test]
    fn advisory_is_silent_for_private_configs() {
        let mut config = ServerConfig::new("https://templates.internal", "secret");
        assert!(config.take_default_advisory().is_none());
    }

    #[test]
    fn update_resets_the_advisory_flag() {
        let mut config = ServerConfig::default();
        config.take_default_advisory();

        config.update("https://templates.internal", "secret");
        assert!(!config.default_advisory_shown);

        // Returning to the default configuration warns again.
        config.update(DEFAULT_SERVER_URL, DEFAULT_API_KEY);
        assert!(config.take_default_advisory().is_some());
    }
}
