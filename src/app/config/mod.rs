use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod user;

pub use user::{ProgressConfig, UserConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("sith-remote")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    /// Where log files go unless overridden on the command line.
    pub fn get_log_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::cache_dir)
            .map(|d| d.join("sith-remote"))
            .unwrap_or_else(|| Self::get_config_dir().join("logs"))
    }

    pub fn load_from(path: &Path) -> Result<UserConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `config.toml`, writing the defaults on first run. A broken file
    /// is an error; the caller falls back to the defaults and reports it
    /// once logging is up.
    pub fn load() -> Result<UserConfig, ConfigError> {
        Self::load_or_create(&Self::get_config_path())
    }

    pub fn load_or_create(path: &Path) -> Result<UserConfig, ConfigError> {
        if !path.exists() {
            let config = UserConfig::default();
            if let Some(dir) = path.parent() {
                let _ = fs::create_dir_all(dir);
            }
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = fs::write(path, content);
            }
            return Ok(config);
        }
        Self::load_from(path)
    }

    pub fn default_toml() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }
}
