//! Error types for the gentree library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the gentree library
#[derive(Error, Debug)]
pub enum Error {
    /// Date string matched none of the accepted patterns
    #[error("Invalid date: no valid date format found for '{0}'")]
    InvalidDate(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record file is not valid TOML or has unknown keys
    #[error("Invalid record file {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No record files found matching pattern: {0}")]
    NoFilesMatched(String),

    /// Record file without any [[person]] table
    #[error("Record file has no [[person]] entries: {}", .0.display())]
    EmptyRecordFile(PathBuf),
}
