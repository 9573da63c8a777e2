//! TOML-based configuration for askdocs.
//!
//! Configuration is loaded from `askdocs.toml` (every field has a default, so
//! a missing file means all-defaults), then overridden by environment
//! variables (`ASKDOCS_BASE_URL`, `ASKDOCS_LOG_LEVEL`). A `.env` file is
//! honoured via dotenvy.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from askdocs.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend endpoint path table.
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Terminal UI and logging settings.
    #[serde(default)]
    pub ui: UiConfig,
}

// ============= Server Configuration =============

/// Connection settings for the backend answering service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Endpoint Configuration =============

/// Paths for each backend call.
///
/// Deployments mount these under different names (`/upload` vs
/// `/refresh-docs`, `/ask` vs `/ask-question`); the table makes the client
/// follow whichever the server exposes without a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// GET: list indexed documents.
    #[serde(default = "default_list_docs")]
    pub list_docs: String,

    /// POST (multipart): upload a file for ingestion.
    #[serde(default = "default_upload")]
    pub upload: String,

    /// POST (JSON): submit a link for ingestion.
    #[serde(default = "default_upload_link")]
    pub upload_link: String,

    /// DELETE: remove a document by filename query parameter.
    #[serde(default = "default_delete_doc")]
    pub delete_doc: String,

    /// POST (JSON): ask a question.
    #[serde(default = "default_ask")]
    pub ask: String,
}

fn default_list_docs() -> String {
    "/list-docs".to_string()
}

fn default_upload() -> String {
    "/refresh-docs".to_string()
}

fn default_upload_link() -> String {
    "/process-link".to_string()
}

fn default_delete_doc() -> String {
    "/delete-doc".to_string()
}

fn default_ask() -> String {
    "/ask-question".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            list_docs: default_list_docs(),
            upload: default_upload(),
            upload_link: default_upload_link(),
            delete_doc: default_delete_doc(),
            ask: default_ask(),
        }
    }
}

// ============= UI Configuration =============

/// Terminal UI and logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick interval for UI refresh, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Log level filter (`trace`, `debug`, `info`, `warn`, `error`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for rolling log files. Logs never go to stdout while the
    /// terminal belongs to the UI.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_tick_ms() -> u64 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

// ============= Loading & Validation =============

impl Config {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)?;
            toml::from_str(&raw).map_err(|e| {
                AppError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Config::default()
        };

        if let Ok(url) = env::var("ASKDOCS_BASE_URL") {
            config.server.base_url = url;
        }
        if let Ok(level) = env::var("ASKDOCS_LOG_LEVEL") {
            config.ui.log_level = level;
        }

        Ok(config)
    }

    /// Check that the resolved configuration is usable.
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.server.base_url)
            .map_err(|e| AppError::Config(format!("invalid base_url: {}", e)))?;

        let endpoints = [
            ("list_docs", &self.endpoints.list_docs),
            ("upload", &self.endpoints.upload),
            ("upload_link", &self.endpoints.upload_link),
            ("delete_doc", &self.endpoints.delete_doc),
            ("ask", &self.endpoints.ask),
        ];
        for (name, path) in endpoints {
            if !path.starts_with('/') {
                return Err(AppError::Config(format!(
                    "endpoint {} must start with '/': {}",
                    name, path
                )));
            }
        }

        if self.ui.tick_ms == 0 {
            return Err(AppError::Config("ui.tick_ms must be non-zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.endpoints.list_docs, "/list-docs");
        assert_eq!(config.endpoints.ask, "/ask-question");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let raw = r#"
            [server]
            base_url = "http://docs.internal:9000"

            [endpoints]
            ask = "/ask"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.base_url, "http://docs.internal:9000");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.endpoints.ask, "/ask");
        assert_eq!(config.endpoints.upload, "/refresh-docs");
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.server.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_endpoint() {
        let mut config = Config::default();
        config.endpoints.ask = "ask".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.endpoints.delete_doc, "/delete-doc");
    }
}
