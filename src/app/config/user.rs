use crate::app::keys::KeyConfig;
use crate::player::{TickMode, DEFAULT_INCREMENT_SECS};
use serde::{Deserialize, Serialize};

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_oauth_token")]
    pub oauth_token: String,
    /// `limit` sent with playlist requests
    #[serde(default = "default_playlist_limit")]
    pub playlist_limit: u32,
    /// Server log lines kept in memory
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    /// tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_increment_secs")]
    pub increment_secs: f64,
    #[serde(default)]
    pub mode: TickMode,
}

fn default_server_url() -> String {
    "http://localhost:8107".to_string()
}

fn default_oauth_token() -> String {
    "xxx".to_string()
}

fn default_playlist_limit() -> u32 {
    6789
}

fn default_log_capacity() -> usize {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_tick_ms() -> u64 {
    100
}

fn default_increment_secs() -> f64 {
    DEFAULT_INCREMENT_SECS
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            increment_secs: default_increment_secs(),
            mode: TickMode::default(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            oauth_token: default_oauth_token(),
            playlist_limit: default_playlist_limit(),
            log_capacity: default_log_capacity(),
            log_level: default_log_level(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            progress: ProgressConfig::default(),
            keys: KeyConfig::default(),
        }
    }
}
