//! Server configuration read from the environment.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON array of users loaded once at startup.
    pub users_seed: PathBuf,
    /// JSON array of posts loaded once at startup.
    pub posts_seed: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            users_seed: data.join("users.json"),
            posts_seed: data.join("posts.json"),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `USERS_SEED` and `POSTS_SEED`, falling back to
    /// the defaults for any that are unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: port, source })?;
        }
        if let Some(path) = lookup("USERS_SEED") {
            config.users_seed = PathBuf::from(path);
        }
        if let Some(path) = lookup("POSTS_SEED") {
            config.posts_seed = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
