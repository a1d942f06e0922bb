// Configuration module entry point.
// Layered loading: built-in defaults, then an optional TOML file, then
// SWSERVE_* environment variables. The result is immutable for the process
// lifetime.

mod state;
mod types;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig, SiteConfig};

use std::net::SocketAddr;

use crate::error::ServerError;

/// Config file stem searched in the working directory (any extension the
/// config crate understands, e.g. `swserve.toml`).
pub const DEFAULT_CONFIG_FILE: &str = "swserve";

impl Config {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SWSERVE"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8889)?
            .set_default("site.root", ".")?
            .set_default("http.server_name", "swserve/0.1")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddr { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8889);
        assert_eq!(cfg.site.root, ".");
        assert_eq!(cfg.site.index_files, ["index.html", "index.htm"]);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_default_extra_headers() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.http.extra_headers.len(), 1);
        assert_eq!(
            cfg.http.extra_headers.get("Service-Worker-Allowed"),
            Some(&"/".to_string())
        );
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8889);
        assert!(addr.ip().is_loopback());
    }
}
