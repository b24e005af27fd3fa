use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for connreq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving client options or talking to the engine.
///
/// [`Error::Validation`] and [`Error::RootCertificate`] are produced by this
/// crate, always before any engine call. The remaining variants originate in
/// the connection engine and are only propagated.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The option surface is malformed or contradictory.
    #[error("{message}")]
    Validation {
        /// Human-readable diagnostic.
        message: String,
    },

    /// The legacy context named a CA file that could not be loaded.
    #[error("Failed to load root certificate from file {}: {source}", path.display())]
    RootCertificate {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// The engine failed to establish or maintain a connection.
    #[error("connection error: {message}")]
    Connection {
        /// Description reported by the engine.
        message: String,
    },

    /// Authentication failed.
    #[error("authentication failed")]
    Auth,

    /// An IO error occurred.
    #[error("IO error: {source}")]
    Io {
        /// The underlying IO error.
        #[from]
        source: io::Error,
    },
}

impl Error {
    /// Builds a validation error and records it.
    ///
    /// `category` is a short machine-friendly tag such as
    /// `tls_config_conflict`, attached to the log event.
    pub(crate) fn validation(category: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(category, "{}", message);
        Error::Validation { message }
    }

    /// Returns `true` for errors detected from the option surface alone.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::RootCertificate { .. })
    }
}
