//! Configuration loading for Civica.
//! Reads civica.toml from the current directory or the path in the CIVICA_CONFIG env var,
//! then applies environment overrides.

use std::path::{Path, PathBuf};

use civica_common::{CivicaError, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "CIVICA_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "civica.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means permissive.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host()             -> String { "127.0.0.1".to_string() }
fn default_port()             -> u16    { 3000 }
fn default_max_upload_bytes() -> usize  { 25 * 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_agent_url()    -> String { "http://localhost:8000".to_string() }
fn default_timeout_secs() -> u64    { 120 }

impl Default for AgentConfig {
    fn default() -> Self {
        Self { base_url: default_agent_url(), timeout_secs: default_timeout_secs() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_complaints_csv")]
    pub complaints_csv: PathBuf,
}

fn default_complaints_csv() -> PathBuf { PathBuf::from("test-data/complaints.csv") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { complaints_csv: default_complaints_csv() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}


impl Config {
    /// Load configuration from civica.toml and the process environment.
    /// Checks CIVICA_CONFIG first, then the current directory. A missing file
    /// yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = Self::from_file_or_default(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CivicaError::Config(e.to_string()))
    }

    /// Apply environment overrides. `lookup` resolves a variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PYTHON_AGENT_URL") {
            self.agent.base_url = url;
        }
        if let Some(host) = lookup("CIVICA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CIVICA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| CivicaError::Config(format!("CIVICA_PORT must be a valid port, got {port:?}")))?;
        }
        if let Some(path) = lookup("CIVICA_COMPLAINTS_CSV") {
            self.data.complaints_csv = PathBuf::from(path);
        }
        if let Some(level) = lookup("CIVICA_LOG") {
            self.logging.level = level;
        }
        Ok(())
    }
}
