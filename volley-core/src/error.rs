//! Script error types.

use thiserror::Error;

/// Result type for script loading and serialization.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors that can occur while loading a script document.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// I/O error reading a script file.
    #[error("failed to read script from {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The document could not be parsed.
    #[error("failed to parse {format} script: {message}")]
    Parse {
        /// Source format ("yaml" or "json").
        format: &'static str,
        /// Error message from the parser.
        message: String,
    },
}
