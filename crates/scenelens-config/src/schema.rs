//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub introspection: IntrospectionConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Line-protocol listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9999
}

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionConfig {
    /// Key of the top-level sub-graph.
    #[serde(default = "default_root_graph_key")]
    pub root_graph_key: String,

    /// Maximum ancestors visited per element.
    #[serde(default = "default_depth_limit")]
    pub depth_limit: usize,

    /// Upper bound for each host snapshot read.
    #[serde(default = "default_host_timeout_ms")]
    pub host_timeout_ms: u64,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            root_graph_key: default_root_graph_key(),
            depth_limit: default_depth_limit(),
            host_timeout_ms: default_host_timeout_ms(),
        }
    }
}

fn default_root_graph_key() -> String {
    "_root_".to_string()
}

fn default_depth_limit() -> usize {
    10
}

fn default_host_timeout_ms() -> u64 {
    2000
}

/// Synthetic input backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputBackend {
    /// OS-level input through enigo.
    #[default]
    Enigo,
    /// Log the event and report success without touching the OS.
    DryRun,
}

/// Input dispatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub backend: InputBackend,

    /// Screen position of the viewport's top-left corner.
    #[serde(default)]
    pub origin_x: i32,

    #[serde(default)]
    pub origin_y: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write daily-rotated log files.
    #[serde(default)]
    pub file: bool,

    /// Log directory; defaults to `~/.scenelens/logs`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: false,
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
