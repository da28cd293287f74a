//! Error types for colhash
//!
//! Errors fall into two groups: configuration errors, raised while an
//! operation is being planned and before any row is touched, and
//! evaluation errors, raised while a column is being processed. A null
//! input row is never an error.

use crate::column::DataType;
use thiserror::Error;

/// Main error type for colhash operations
#[derive(Error, Debug)]
pub enum ColHashError {
    /// Operation name not present in the registry
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Invalid static parameter or unsupported algorithm configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while evaluating a column
    #[error("Compute error: {0}")]
    Evaluation(String),

    /// Input column has a type the operation cannot consume
    #[error("Invalid input type for '{operation}': expected {expected}, got {actual}")]
    InvalidInputType {
        operation: String,
        expected: String,
        actual: DataType,
    },

    /// Parameter column length neither matches the input nor broadcasts
    #[error("Length mismatch: input has {expected} rows, parameter column has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Malformed geohash string
    #[error("Invalid geohash '{hash}': {reason}")]
    InvalidGeohash { hash: String, reason: String },

    /// Coordinate outside the valid range or not finite
    #[error("Invalid coordinate (longitude {longitude}, latitude {latitude}): {reason}")]
    InvalidCoordinate {
        longitude: f64,
        latitude: f64,
        reason: String,
    },

    /// Thread pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// I/O error while reading CLI input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ColHashError>,
    },
}

impl ColHashError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an evaluation error
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }

    /// Create an input type error
    pub fn input_type(
        operation: impl Into<String>,
        expected: impl Into<String>,
        actual: DataType,
    ) -> Self {
        Self::InvalidInputType {
            operation: operation.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create an invalid geohash error
    pub fn geohash(hash: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGeohash {
            hash: hash.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid coordinate error
    pub fn coordinate(longitude: f64, latitude: f64, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            longitude,
            latitude,
            reason: reason.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error was raised at plan time
    pub fn is_config_error(&self) -> bool {
        match self {
            Self::UnknownOperation(_) | Self::Config(_) => true,
            Self::WithContext { source, .. } => source.is_config_error(),
            _ => false,
        }
    }

    /// Check if this error was raised while evaluating rows
    pub fn is_evaluation_error(&self) -> bool {
        match self {
            Self::Evaluation(_)
            | Self::InvalidInputType { .. }
            | Self::LengthMismatch { .. }
            | Self::InvalidGeohash { .. }
            | Self::InvalidCoordinate { .. } => true,
            Self::WithContext { source, .. } => source.is_evaluation_error(),
            _ => false,
        }
    }
}

/// Result type alias for colhash operations
pub type Result<T> = std::result::Result<T, ColHashError>;
