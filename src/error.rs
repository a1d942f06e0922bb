//! Startup error types.
//!
//! Everything here is fatal: these errors surface from `main` and take the
//! process down with a non-zero exit code. Per-request failures (404, 500)
//! are plain responses and never reach this enum.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("document root '{}' is not usable: {source}", .path.display())]
    DocumentRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid extra header '{name}: {value}'")]
    InvalidHeader { name: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
