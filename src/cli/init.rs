//! `askdocs init` - scaffold a configuration file.

use crate::cli::output::Output;
use crate::types::{AppError, Result};
use std::fs;
use std::path::Path;

/// Template written as `askdocs.toml`. Every value shown is the default, so
/// the generated file works untouched against a local backend.
const CONFIG_TEMPLATE: &str = r#"# askdocs configuration
#
# Every field is optional; the values below are the defaults.

[server]
# Base URL of the document QA backend, without a trailing slash.
base_url = "http://127.0.0.1:8000"
# Per-request timeout in seconds.
timeout_secs = 30

# Paths for each backend call. Edit these when the server mounts its API
# under different names (for example "/upload" and "/ask").
[endpoints]
list_docs = "/list-docs"
upload = "/refresh-docs"
upload_link = "/process-link"
delete_doc = "/delete-doc"
ask = "/ask-question"

[ui]
# UI refresh tick in milliseconds.
tick_ms = 250
# Log level: trace, debug, info, warn or error.
log_level = "info"
# Directory for rolling log files (the terminal itself stays log-free).
log_dir = "logs"
"#;

/// Write `askdocs.toml` into `path`.
pub fn run(path: &Path, force: bool, out: &Output) -> Result<()> {
    out.banner();

    fs::create_dir_all(path)?;
    let config_path = path.join("askdocs.toml");

    if config_path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    out.success(&format!("Created {}", config_path.display()));
    out.info("Edit [server].base_url to point at your backend, then run `askdocs`.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_default_config() {
        let config: crate::config::Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        let defaults = crate::config::Config::default();
        assert_eq!(config.server.base_url, defaults.server.base_url);
        assert_eq!(config.endpoints.ask, defaults.endpoints.ask);
        assert_eq!(config.ui.tick_ms, defaults.ui.tick_ms);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let out = Output::no_color();
        run(dir.path(), false, &out).unwrap();
        assert!(run(dir.path(), false, &out).is_err());
        assert!(run(dir.path(), true, &out).is_ok());
    }
}
