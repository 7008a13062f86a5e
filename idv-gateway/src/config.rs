//! Runtime configuration read from the process environment.

use std::net::SocketAddr;

/// Environment variable holding the socket address to bind.
pub const LISTEN_ADDR_VAR: &str = "IDV_LISTEN_ADDR";

/// Environment variable holding the request body limit for uploads, in bytes.
pub const MAX_UPLOAD_BYTES_VAR: &str = "IDV_MAX_UPLOAD_BYTES";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors raised while loading [`GatewayConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the gateway process.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// Largest accepted request body on `/api/submit`.
    pub max_upload_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Unset variables fall back to their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = addr.parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                var: LISTEN_ADDR_VAR,
                value: addr.clone(),
                reason: e.to_string(),
            }
        })?;

        let max_upload_bytes = match lookup(MAX_UPLOAD_BYTES_VAR) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    var: MAX_UPLOAD_BYTES_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            listen_addr,
            max_upload_bytes,
        })
    }
}
