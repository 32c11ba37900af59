//! Error types for code generation

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while emitting a script
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to write the script
    #[error("failed to write script to {path}: {source}")]
    Write {
        /// Destination path
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },
}
