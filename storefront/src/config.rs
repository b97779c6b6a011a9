//! Environment-driven configuration.
//!
//! All wiring decisions are made once at startup from environment
//! variables; nothing reads the environment after [`Config::from_env`].

use serde::Deserialize;
use tracing::warn;

/// Backend connection parameters, supplied as a JSON document
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Backend project identifier
    pub project_id: String,
    /// Backend API key
    pub api_key: String,
}

/// Resolved application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Backend connection parameters; `None` means the catalog is
    /// unavailable and the app runs in its degraded mode
    pub backend: Option<BackendConfig>,
    /// Namespace for all catalog and booking document paths
    pub app_id: String,
    /// Pre-issued auth token for non-interactive sign-in, if any
    pub initial_auth_token: Option<String>,
}

/// Environment variable holding the backend config JSON
pub const BACKEND_CONFIG_VAR: &str = "STAYSCOUT_BACKEND_CONFIG";

/// Environment variable overriding the application namespace
pub const APP_ID_VAR: &str = "STAYSCOUT_APP_ID";

/// Environment variable holding a pre-issued auth token
pub const AUTH_TOKEN_VAR: &str = "STAYSCOUT_AUTH_TOKEN";

/// Namespace used when [`APP_ID_VAR`] is unset
pub const DEFAULT_APP_ID: &str = "default-app-id";

impl Config {
    /// Load configuration from process environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup, for testing
    ///
    /// A missing or unparsable backend config yields `backend: None`
    /// rather than an error; the app starts in its degraded
    /// catalog-unavailable mode instead of refusing to run.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend = lookup(BACKEND_CONFIG_VAR).and_then(|raw| {
            match serde_json::from_str::<BackendConfig>(&raw) {
                Ok(config) => Some(config),
                Err(error) => {
                    warn!(%error, "backend config is not valid JSON, catalog will be unavailable");
                    None
                }
            }
        });

        let app_id = lookup(APP_ID_VAR)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_ID.to_string());

        let initial_auth_token = lookup(AUTH_TOKEN_VAR).filter(|token| !token.trim().is_empty());

        Self {
            backend,
            app_id,
            initial_auth_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(vars: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| vars.get(name).map(ToString::to_string)
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_vars(|_| None);
        assert!(config.backend.is_none());
        assert_eq!(config.app_id, DEFAULT_APP_ID);
        assert!(config.initial_auth_token.is_none());
    }

    #[test]
    fn parses_backend_config_json() {
        let vars = HashMap::from([
            (
                BACKEND_CONFIG_VAR,
                r#"{"project_id":"stayscout-prod","api_key":"key-123"}"#,
            ),
            (APP_ID_VAR, "stayscout"),
            (AUTH_TOKEN_VAR, "token-abc"),
        ]);
        let config = Config::from_vars(lookup_in(&vars));
        let backend = config.backend.unwrap();
        assert_eq!(backend.project_id, "stayscout-prod");
        assert_eq!(backend.api_key, "key-123");
        assert_eq!(config.app_id, "stayscout");
        assert_eq!(config.initial_auth_token.as_deref(), Some("token-abc"));
    }

    #[test]
    fn malformed_backend_json_degrades_to_no_backend() {
        let vars = HashMap::from([(BACKEND_CONFIG_VAR, "{not json")]);
        let config = Config::from_vars(lookup_in(&vars));
        assert!(config.backend.is_none());
    }

    #[test]
    fn blank_app_id_falls_back_to_default() {
        let vars = HashMap::from([(APP_ID_VAR, "   ")]);
        let config = Config::from_vars(lookup_in(&vars));
        assert_eq!(config.app_id, DEFAULT_APP_ID);
    }
}
