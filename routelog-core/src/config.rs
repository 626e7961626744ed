use crate::error::RouteLogError;
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration for the demo server and its request logger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteLogConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

/// Request logger settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub output: OutputTarget,
    /// Request paths that are never logged.
    #[serde(default)]
    pub skip_paths: Vec<String>,
}

/// Access log line encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where access log lines are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

// ── Defaults ──────────────────────────────────────────────────

fn default_addr() -> String { "0.0.0.0:9000".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = RouteLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(RouteLogError::InvalidFormat(s.to_string())),
        }
    }
}

impl RouteLogConfig {
    /// Load configuration from YAML file + env overrides.
    ///
    /// Environment variables use the `ROUTELOG_` prefix with `__` between
    /// sections, e.g. `ROUTELOG_LOGGER__FORMAT=json`.
    pub fn load(path: &Path) -> Result<Self, RouteLogError> {
        let config: RouteLogConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("ROUTELOG_").split("__"))
            .extract()?;
        Ok(config)
    }
}
