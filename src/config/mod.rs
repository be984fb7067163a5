//! Process environment and the service configuration file.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

/// Settings read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub config_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
            config_path: env::var("MUI_CONFIG").unwrap_or_else(|_| "./config.toml".to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid environment pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveDirectory {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub base_dn: String,
    #[serde(default)]
    pub query_user: String,
    #[serde(default)]
    pub query_password: String,
    #[serde(default)]
    pub with_tls: bool,
}

impl ActiveDirectory {
    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.base_dn.is_empty() && self.query_user.is_empty()
    }
}

/// MES agent callback URLs of one station. Empty entries are not notified.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationFunctionConfig {
    #[serde(default, rename = "loadWorkOrder")]
    pub load_work_order: String,
    #[serde(default, rename = "closedWorkOrder")]
    pub closed_work_order: String,
    #[serde(default, rename = "bindResource")]
    pub bind_resource: String,
}

/// The service configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub development_mode: bool,
    /// Request deadline in seconds; zero disables it.
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub data_manager_endpoint: String,
    #[serde(default)]
    pub active_directory: ActiveDirectory,
    #[serde(default)]
    pub token_expired_in_seconds: u64,
    #[serde(default)]
    pub permissions: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub station_function_config: HashMap<String, StationFunctionConfig>,
    #[serde(default)]
    pub mes_path: String,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let expanded = substitute_env_vars(content)?;
        Ok(toml::from_str(&expanded)?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    pub fn station_functions(&self, station: &str) -> Option<&StationFunctionConfig> {
        self.station_function_config.get(station)
    }

    pub fn load_work_order_url(&self, station: &str) -> Option<&str> {
        self.station_functions(station)
            .map(|c| c.load_work_order.as_str())
            .filter(|url| !url.is_empty())
    }

    pub fn closed_work_order_url(&self, station: &str) -> Option<&str> {
        self.station_functions(station)
            .map(|c| c.closed_work_order.as_str())
            .filter(|url| !url.is_empty())
    }

    pub fn bind_resource_url(&self, station: &str) -> Option<&str> {
        self.station_functions(station)
            .map(|c| c.bind_resource.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Replaces every `${VAR}` with the environment value, or nothing when unset.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;
    let result = re.replace_all(content, |caps: &regex::Captures| {
        env::var(&caps[1]).unwrap_or_default()
    });
    Ok(result.into_owned())
}
