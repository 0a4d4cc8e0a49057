//! Error types for scoutlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while surveying or searching a tree.
///
/// Only failures at the entry point surface here. Problems with individual
/// files during a walk (permissions, binary content, I/O hiccups) are
/// absorbed by the walker and scanner and never reach the caller.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Search token is empty or whitespace-only
    #[error("search pattern must not be empty")]
    EmptyToken,

    /// Search token could not be compiled into match rules
    #[error("invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
