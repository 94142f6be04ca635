//! Application configuration for graphscout.
//!
//! User config lives at `~/.graphscout/graphscout.toml`.
//! CLI flags override config file values, which override defaults.
//! The client secret itself is never stored — only the name of the
//! environment variable that holds it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GraphScoutError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "graphscout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".graphscout";

// ---------------------------------------------------------------------------
// Config structs (matching graphscout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Graph tenant and endpoint settings.
    #[serde(default)]
    pub graph: GraphConfig,
}

/// `[graph]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Directory tenant identifier.
    #[serde(default)]
    pub tenant_id: String,

    /// Application (client) identifier.
    #[serde(default)]
    pub client_id: String,

    /// Name of the env var holding the client secret (never the secret itself).
    #[serde(default = "default_client_secret_env")]
    pub client_secret_env: String,

    /// Graph API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token authority base URL.
    #[serde(default = "default_authority")]
    pub authority: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret_env: default_client_secret_env(),
            base_url: default_base_url(),
            authority: default_authority(),
        }
    }
}

fn default_client_secret_env() -> String {
    "GRAPHSCOUT_CLIENT_SECRET".into()
}
fn default_base_url() -> String {
    "https://graph.microsoft.com/v1.0".into()
}
fn default_authority() -> String {
    "https://login.microsoftonline.com".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.graphscout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GraphScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.graphscout/graphscout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GraphScoutError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| GraphScoutError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GraphScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GraphScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GraphScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve the client secret from the configured env var.
pub fn resolve_client_secret(config: &AppConfig) -> Result<String> {
    let var_name = &config.graph.client_secret_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(GraphScoutError::config(format!(
            "client secret not found. Set the {var_name} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("client_secret_env"));
        assert!(toml_str.contains("GRAPHSCOUT_CLIENT_SECRET"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.graph.base_url, "https://graph.microsoft.com/v1.0");
        assert_eq!(parsed.graph.client_secret_env, "GRAPHSCOUT_CLIENT_SECRET");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[graph]
tenant_id = "my-tenant"
client_id = "my-client"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.graph.tenant_id, "my-tenant");
        assert_eq!(config.graph.authority, "https://login.microsoftonline.com");
    }

    #[test]
    fn client_secret_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.graph.client_secret_env = "GS_TEST_NONEXISTENT_SECRET_12345".into();
        let result = resolve_client_secret(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("secret not found"));
    }
}
