//! Runtime configuration.
//!
//! Built once at startup and passed down explicitly; nothing reads the
//! environment after boot.

use std::env;
use std::path::PathBuf;

/// Process configuration for the tracking server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the durable event log
    pub data_dir: PathBuf,
    /// TCP port the HTTP server listens on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: 10000,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `FORMTRACK_DATA_DIR` overrides the data directory and `PORT` the
    /// listen port; defaults apply when unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let data_dir = env::var("FORMTRACK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { data_dir, port }
    }
}
