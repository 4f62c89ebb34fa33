//! Errors raised while resolving settings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The command line could not be parsed.
    ///
    /// Also carries the help and version outcomes, see
    /// [`ConfigError::is_informational`].
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// The parsed settings are not usable.
    #[error("{0}")]
    Validation(String),

    /// Failed to normalize a path.
    #[error("Failed to resolve path {}: {}", path.display(), source)]
    Io {
        /// Path being normalized.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The logging subsystem does not know the requested severity.
    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),
}

impl ConfigError {
    /// Returns `true` when the parser stopped to print help or version text.
    ///
    /// Such outcomes are not failures: the process should print the message
    /// and exit with success status.
    pub fn is_informational(&self) -> bool {
        match self {
            ConfigError::Parse(err) => matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ),
            _ => false,
        }
    }
}
