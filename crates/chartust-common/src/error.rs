//! Unified error types for the Chartust workspace.
//!
//! Every fallible operation in the workspace returns the shared
//! [`ChartustError`] so callers see one coherent error surface across the
//! option mapper, the render service, and the in-process renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ChartustError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A container operation (pull, run, stop) failed.
    #[error("container operation failed: {message}")]
    Container {
        /// Description of the failed operation, including captured stderr.
        message: String,
    },

    /// The render service never became healthy within the poll budget.
    #[error("render service failed to start after {attempts} attempts")]
    ServiceUnavailable {
        /// Number of health probes that were attempted.
        attempts: u32,
    },

    /// The render service answered with a non-success status.
    #[error("chart render failed: {message}")]
    RenderFailed {
        /// Decoded response body from the render service.
        message: String,
    },

    /// A network-level HTTP failure with no response to decode.
    #[error("HTTP request failed: {source}")]
    Http {
        /// Underlying transport error.
        #[from]
        source: reqwest::Error,
    },

    /// Chart drawing in the in-process renderer failed.
    #[error("chart drawing failed: {message}")]
    Drawing {
        /// Description of the drawing failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ChartustError>;
