//! Server configuration.

use std::net::SocketAddr;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "PERSON_SYNC_BIND_ADDR";
pub const API_PREFIX_VAR: &str = "PERSON_SYNC_API_PREFIX";
pub const CHANNEL_CAPACITY_VAR: &str = "PERSON_SYNC_CHANNEL_CAPACITY";

pub const DEFAULT_API_PREFIX: &str = "/api/persons";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var}: prefix must start with '/' and must not end with '/', got {value:?}")]
    InvalidApiPrefix { var: &'static str, value: String },

    #[error("{var}: channel capacity must be a positive integer, got {value:?}")]
    InvalidChannelCapacity { var: &'static str, value: String },
}

/// Configuration for the person server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Path the person collection is mounted at.
    pub api_prefix: String,
    /// Capacity of the store actor's request channel.
    pub channel_capacity: usize,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Sets the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the collection path.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Sets the store channel capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Reads the configuration from `PERSON_SYNC_*` environment variables, falling back
    /// to the defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr {
                    var: BIND_ADDR_VAR,
                    value,
                })?;
        }

        if let Some(value) = lookup(API_PREFIX_VAR) {
            if !is_valid_prefix(&value) {
                return Err(ConfigError::InvalidApiPrefix {
                    var: API_PREFIX_VAR,
                    value,
                });
            }
            config.api_prefix = value;
        }

        if let Some(value) = lookup(CHANNEL_CAPACITY_VAR) {
            config.channel_capacity = match value.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidChannelCapacity {
                        var: CHANNEL_CAPACITY_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 3000)))
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() > 1 && prefix.starts_with('/') && !prefix.ends_with('/')
}
