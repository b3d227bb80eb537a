//! Server Settings
//!
//! Runtime settings for the API server, layered from an optional
//! `config/server.*` file with `HANA_*` environment overrides on top.
//! Every field has a sensible default so the server starts with no
//! configuration at all.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Settings for the API server binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bind address for the HTTP listener.
    pub host: String,
    pub port: u16,
    /// Per-request timeout applied by the middleware stack.
    pub request_timeout_secs: u64,
    /// Artificial latency for the simulated backend, for demo realism.
    pub simulated_latency_ms: u64,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Default log filter when RUST_LOG is unset.
    pub log_filter: String,
    /// Product catalog file. Falls back to the built-in catalog if absent.
    pub products_file: String,
    /// Support content file. Falls back to the built-in content if absent.
    pub support_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            simulated_latency_ms: 0,
            cors_origins: Vec::new(),
            log_filter: "info,hana_server=debug".to_string(),
            products_file: "config/products.yaml".to_string(),
            support_file: "config/support.yaml".to_string(),
        }
    }
}

impl Settings {
    /// Load from the default `config/server.*` file (if present) plus
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/server").required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load from an explicit settings file plus environment overrides.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref().to_path_buf()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HANA")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors_origins")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
        assert!(settings.cors_origins.is_empty());
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "port: 9001").unwrap();
        writeln!(file, "host: \"127.0.0.1\"").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9001");
        // untouched fields keep their defaults
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.products_file, "config/products.yaml");
    }
}
