//! Domain-specific error types for the installer.
//!
//! Inner modules return typed errors ([`ConfigError`], [`DiscoveryError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.

use thiserror::Error;

/// Errors that arise while resolving settings and the source root.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No explicit source root was given and auto-detection found nothing.
    #[error("cannot determine source root. Use --source or set SKILLS_ROOT")]
    SourceRootNotFound,

    /// The requested source root is not an existing directory.
    #[error("source root does not exist: {0}")]
    SourceRootMissing(String),

    /// The home directory could not be determined, so the default
    /// destination roots cannot be computed.
    #[error("cannot determine home directory")]
    NoHomeDir,

    /// The override file contains a syntax error that prevents parsing.
    #[error("invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path to the file that failed to parse.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// An I/O error occurred while reading a settings-related path.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while enumerating linkable units.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A directory listing failed mid-discovery.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        /// Directory that could not be enumerated.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
