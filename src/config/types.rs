// Configuration types.
// One struct per config-file section; defaults that the layered loader does
// not inject live here as serde defaults.

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker thread count; defaults to the CPU core count.
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Document root configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub root: String,
    /// Files probed, in order, when a directory is requested.
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
}

/// HTTP response configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Headers appended to every response. Additive: a handler-set header
    /// with the same name is never overridden.
    #[serde(default = "default_extra_headers")]
    pub extra_headers: HashMap<String, String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format: combined, common, or json.
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (stdout if not set).
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set).
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

fn default_extra_headers() -> HashMap<String, String> {
    // The reason this server exists: let a Service Worker registered at a
    // sub-path control the whole origin.
    HashMap::from([("Service-Worker-Allowed".to_string(), "/".to_string())])
}

fn default_access_log_format() -> String {
    "combined".to_string()
}
