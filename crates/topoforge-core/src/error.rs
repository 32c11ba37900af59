//! Error types for topoforge-core

use thiserror::Error;

/// Result type alias for topoforge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in topoforge-core
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration, catalog, or topology file could not be found
    #[error("file not found: {path}")]
    NotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Catalog content is unusable
    #[error("invalid catalog: {message}")]
    CatalogInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// An entity in a topology document was rejected by the store
    #[error("{section}[{index}]: {source}")]
    DocumentEntity {
        /// Document section, e.g. `devices`
        section: &'static str,
        /// Zero-based position within the section
        index: usize,
        /// Why the store rejected it
        source: ShapeError,
    },

    /// Malformed input at an append boundary
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed input rejected before it reaches the store.
///
/// A shape error never leaves a partial append behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A required string was empty
    #[error("{entity}.{field} must not be empty")]
    EmptyField {
        /// Entity kind, e.g. `device`
        entity: &'static str,
        /// Field name as it appears on the wire
        field: &'static str,
    },

    /// A coordinate was NaN or infinite
    #[error("coordinate must be a finite number, got {value}")]
    NonFiniteCoordinate {
        /// The rejected value
        value: String,
    },

    /// A catalog listing limit outside `1..=500`
    #[error("limit must be between 1 and {max}, got {limit}")]
    LimitOutOfRange {
        /// Requested limit
        limit: i64,
        /// Largest accepted limit
        max: usize,
    },

    /// Arguments could not be decoded into the expected shape
    #[error("invalid arguments for {operation}: {message}")]
    InvalidArguments {
        /// Operation being invoked
        operation: String,
        /// Decoder message
        message: String,
    },
}
