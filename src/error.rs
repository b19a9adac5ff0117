//! Error types for sg-audit.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all sg-audit operations.
#[derive(Error, Debug)]
pub enum SgAuditError {
    /// I/O operation failed (read or write). Covers file-not-found.
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        path: PathBuf,
        operation: IoOperation,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON at all.
    #[error("Failed to parse snapshot JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// Structural violation of the snapshot contract. Fatal: no findings
    /// are produced for a malformed snapshot.
    #[error("Malformed snapshot: {field}: {message}")]
    MalformedSnapshot { field: String, message: String },
}

impl SgAuditError {
    /// Create an I/O read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Read,
            source,
        }
    }

    /// Create an I/O write error.
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: IoOperation::Write,
            source,
        }
    }

    /// Create a malformed-snapshot error naming the offending field.
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// I/O operation types, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
}

impl std::fmt::Display for IoOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Result type alias for sg-audit operations.
pub type Result<T> = std::result::Result<T, SgAuditError>;
