//! Server error types.

use thiserror::Error;

/// Errors that can occur while running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address could not be parsed.
    #[error("invalid address '{addr}': {source}")]
    InvalidAddress {
        /// The configured address.
        addr: String,
        /// Underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Failed to bind to the configured address.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        /// The address we tried to bind.
        addr: std::net::SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment override could not be applied.
    #[error("failed to parse environment variable {var}: {reason}")]
    InvalidEnv {
        /// The offending variable.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid_env(var: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEnv {
            var: var.to_string(),
            reason: reason.into(),
        }
    }
}
