//! Gradescope Error Types
//!
//! This module defines [`GradescopeError`], the single error type returned by the
//! suite hooks, the test watcher and the report writer. Every failure is surfaced to
//! the caller; nothing in this crate retries or swallows an error.

use std::io;
use std::path::PathBuf;

/// Represents all error types that can occur while collecting and writing results.
#[derive(Debug, thiserror::Error)]
pub enum GradescopeError {
    /// The report directory could not be created.
    #[error("Failed to create report directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// A report file could not be written.
    #[error("Failed to write report {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// A report file could not be read back.
    #[error("Failed to read report {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// A score record could not be encoded or decoded.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A suite already owns a test with this identifier.
    #[error("Duplicate test: {0}")]
    DuplicateTest(String),

    /// A test name that cannot be told apart from its suite name.
    #[error("Invalid test name: {0}")]
    InvalidTestName(String),

    /// The harness was asked to run a test it does not know about.
    #[error("Unknown test: {0}")]
    UnknownTest(String),
}
