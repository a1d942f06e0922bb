// Application state.
// Configuration plus values derived from it once at startup, shared
// immutably across connection tasks. There is no runtime mutability: the
// process must be restarted to pick up config changes.

use std::path::PathBuf;

use hyper::header::{HeaderName, HeaderValue};

use super::types::Config;
use crate::error::ServerError;

pub struct AppState {
    pub config: Config,
    /// Canonicalized document root; resolution containment checks compare
    /// against this path.
    pub root: PathBuf,
    pub server_name: HeaderValue,
    /// Extra headers pre-parsed into typed name/value pairs so the request
    /// path never re-validates configuration.
    pub extra_headers: Vec<(HeaderName, HeaderValue)>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let root = PathBuf::from(&config.site.root);
        let root = root
            .canonicalize()
            .map_err(|source| ServerError::DocumentRoot { path: root, source })?;

        let server_name = HeaderValue::from_str(&config.http.server_name).map_err(|_| {
            ServerError::InvalidHeader {
                name: "Server".to_string(),
                value: config.http.server_name.clone(),
            }
        })?;

        let mut extra_headers = Vec::with_capacity(config.http.extra_headers.len());
        for (name, value) in &config.http.extra_headers {
            let invalid = || ServerError::InvalidHeader {
                name: name.clone(),
                value: value.clone(),
            };
            let header_name = name.parse::<HeaderName>().map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            extra_headers.push((header_name, header_value));
        }

        Ok(Self {
            config,
            root,
            server_name,
            extra_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config::load_from("no-such-config-file").unwrap()
    }

    #[test]
    fn test_state_from_defaults() {
        let state = AppState::new(base_config()).unwrap();
        assert!(state.root.is_absolute());
        assert_eq!(state.extra_headers.len(), 1);
        let (name, value) = &state.extra_headers[0];
        assert_eq!(name.as_str(), "service-worker-allowed");
        assert_eq!(value, "/");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let mut config = base_config();
        config.site.root = "no/such/directory".to_string();
        assert!(matches!(
            AppState::new(config),
            Err(ServerError::DocumentRoot { .. })
        ));
    }

    #[test]
    fn test_bad_extra_header_name_is_fatal() {
        let mut config = base_config();
        config
            .http
            .extra_headers
            .insert("bad header\nname".to_string(), "x".to_string());
        assert!(matches!(
            AppState::new(config),
            Err(ServerError::InvalidHeader { .. })
        ));
    }
}
