//! Data directory and `config.toml` loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use suki_types::config::SukiConfig;
use suki_types::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `SUKI_DATA_DIR` environment variable
/// 2. `~/.suki`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SUKI_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".suki");
    }

    PathBuf::from(".suki")
}

/// `{data_dir}/config.toml`.
pub fn default_config_path() -> PathBuf {
    resolve_data_dir().join(CONFIG_FILE_NAME)
}

/// Load the configuration at `path`.
///
/// A missing file yields the defaults. An unreadable or malformed file is an
/// error.
pub async fn load_config(path: &Path) -> Result<SukiConfig, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(SukiConfig::default())
        }
        Err(e) => Err(ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

pub fn parse_config(content: &str) -> Result<SukiConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}
