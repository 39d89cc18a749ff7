//! Configuration for the trellis graph client.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`TRELLIS__` prefix, `__` separator)
//! 2. Config file (`trellis.toml` `[graph]` section)
//! 3. Defaults

use serde::Deserialize;

use crate::error::TrellisError;

/// Connection parameters for the Bolt endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Database host (default: "localhost").
    #[serde(default = "default_host")]
    pub host: String,

    /// Bolt port (default: 7687).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database user (default: "neo4j").
    #[serde(default = "default_username")]
    pub username: String,

    /// Database password.
    #[serde(default)]
    pub password: String,

    /// Connection pool size (default: 16).
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Result fetch batch size (default: 256).
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

impl GraphConfig {
    /// The Bolt connection URI for these parameters.
    pub fn uri(&self) -> String {
        format!("neo4j://{}:{}", self.host, self.port)
    }

    /// Load configuration from `{file_prefix}.toml` and the environment.
    ///
    /// A missing file or `[graph]` section falls back to defaults; a
    /// malformed source is an error.
    pub fn load(file_prefix: &str) -> Result<Self, TrellisError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("TRELLIS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| TrellisError::Config(e.to_string()))?;

        match cfg.get::<GraphConfig>("graph") {
            Ok(c) => Ok(c),
            Err(_) => Ok(GraphConfig::default()),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: String::new(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    7687
}

fn default_username() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

fn default_fetch_size() -> usize {
    256
}
