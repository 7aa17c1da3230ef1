//! Error types for hilite-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors surfaced by a document backend.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An underlying file operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A page index past the end of the document was requested.
    #[error("page {0} out of range")]
    PageOutOfRange(usize),

    /// The document structure could not be interpreted.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Any other failure reported by the backend library.
    #[error("document backend error: {0}")]
    Backend(String),
}

/// Result type alias using [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;
