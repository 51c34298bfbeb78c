use crate::parser::DEFAULT_STATUS_PATH;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Path to Nagios' status.dat.
    #[serde(default = "default_status_path")]
    pub path: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            path: default_status_path(),
        }
    }
}

fn default_status_path() -> String {
    DEFAULT_STATUS_PATH.into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "127.0.0.1".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often serve mode re-reads the status file.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// How often to log refresh stats at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

fn default_refresh_interval_ms() -> u64 {
    10_000
}

fn default_stats_log_interval_secs() -> u64 {
    300
}

impl AppConfig {
    /// Loads `explicit`, else `$CONFIG_FILE`, else `config.toml`.
    /// A missing file means built-in defaults; an explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var("CONFIG_FILE")
                .unwrap_or_else(|_| "config.toml".into())
                .into(),
        };
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("config {}: {}", path.display(), e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.status.path.is_empty(),
            "status.path must be non-empty"
        );
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.monitoring.refresh_interval_ms > 0,
            "monitoring.refresh_interval_ms must be > 0, got {}",
            self.monitoring.refresh_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
