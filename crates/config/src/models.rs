use super::errors::ConfigError;
use qlstatus_models::{ConfigurationError, ServerAddress};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub status: StatusSettings,
    pub servers: ServersSettings,
    #[serde(default = "super::defaults::pacing_settings")]
    pub pacing: PacingSettings,
    #[serde(default = "super::defaults::watch_settings")]
    pub watch: WatchSettings,
}

/// Remote status-aggregation service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusSettings {
    #[serde(default = "super::defaults::status_endpoint")]
    pub endpoint: String,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServersSettings {
    /// Comma-separated `host:port` list, kept raw so it can be validated per invocation
    #[serde(default)]
    pub list: String,
    #[serde(default)]
    pub show_in_chat: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PacingSettings {
    #[serde(default = "super::defaults::chat_pacing")]
    pub chat: PacingConfig,
    #[serde(default = "super::defaults::irc_pacing")]
    pub irc: PacingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PacingConfig {
    pub batch_size: NonZeroUsize,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchSettings {
    #[serde(default = "super::defaults::watch_enabled")]
    pub enabled: bool,
    #[serde(default = "super::defaults::config_watch_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "super::defaults::config_reload_channel_size")]
    pub reload_channel_size: usize,
}

impl Config {
    /// Parses and validates configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("status.endpoint must not be empty".to_string()));
        }
        if self.status.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig("status.timeout_secs must be at least 1".to_string()));
        }
        if self.watch.reload_channel_size == 0 {
            return Err(ConfigError::InvalidConfig("watch.reload_channel_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Server list as typed addresses. An unset or malformed list is not a
    /// load error; it is reported to whoever runs the command.
    pub fn server_addresses(&self) -> Result<Vec<ServerAddress>, ConfigurationError> {
        ServerAddress::parse_list(&self.servers.list)
    }

    /// Number of entries in the server list, 0 when it is unset or malformed
    pub fn servers_count(&self) -> usize {
        self.server_addresses().map(|a| a.len()).unwrap_or(0)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.status.timeout_secs)
    }
}

impl PacingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
