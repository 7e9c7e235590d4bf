//! Error types for taskify store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during `FileStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A stored document exists but does not parse. Surfaced rather than
    /// silently reset so user data is never discarded on a bad read.
    #[error("malformed data in {path}: {source}")]
    Malformed {
        /// File holding the key.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for writing.
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Logical key being written.
        key: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
