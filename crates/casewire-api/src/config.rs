//! Session configuration — one JSON file describing a service connection.
//!
//! Matches the explorer's hand-edited config file: server root, API base
//! path, OAuth token endpoint, client credentials, and the operator's user
//! credentials. Loaded once at startup and handed to the transport.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Server root, e.g. `https://pega.example.com`.
    pub server: String,
    /// API base path under the server root, e.g. `/prweb/api/application/v2`.
    pub api_path: String,
    /// OAuth token path under the server root.
    pub token_path: String,
    pub client_id: String,
    pub client_secret: String,
    pub user_id: String,
    pub password: String,
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), server = %config.server, "session config loaded");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ApiError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The API base URL every non-login endpoint is derived from.
    pub fn api_base(&self) -> Result<Url, ApiError> {
        self.join(&self.api_path)
    }

    /// The OAuth token endpoint.
    pub fn token_url(&self) -> Result<Url, ApiError> {
        self.join(&self.token_path)
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        let server = self.server.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{server}/{path}"))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> SessionConfig {
        SessionConfig {
            server: "https://pega.example.com/".into(),
            api_path: "/prweb/api/application/v2".into(),
            token_path: "prweb/PRRestService/oauth2/v1/token".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
            user_id: "operator".into(),
            password: "rules".into(),
        }
    }

    #[test]
    fn url_derivation_normalizes_slashes() {
        let config = config();
        assert_eq!(
            config.api_base().unwrap().as_str(),
            "https://pega.example.com/prweb/api/application/v2"
        );
        assert_eq!(
            config.token_url().unwrap().as_str(),
            "https://pega.example.com/prweb/PRRestService/oauth2/v1/token"
        );
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let config = config();
        config.save(&path).unwrap();
        let loaded = SessionConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{ "server": "https://pega.example.com" }"#).unwrap();

        let loaded = SessionConfig::load(&path).unwrap();
        assert_eq!(loaded.server, "https://pega.example.com");
        assert!(loaded.client_id.is_empty());
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = SessionConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
