//! Central error types for ClipForge.
//!
//! The editing core itself never fails: out-of-range geometry is clamped and
//! refused timeline/keyframe operations degrade to "no state change". These
//! errors cover the edges of the crate (metadata intake, config loading,
//! strict parsing, JSON export). All errors implement `Serialize` so they can
//! cross the JS bridge as plain strings.

use serde::Serialize;
use thiserror::Error;

/// Main error type for ClipForge operations.
#[derive(Error, Debug)]
pub enum ClipForgeError {
    /// Video metadata from the host was unusable (non-positive size, duration or fps)
    #[error("Invalid video metadata: {0}")]
    InvalidMetadata(String),

    /// Aspect ratio string was not `free` or `w:h`
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(String),

    /// Editor configuration could not be read or parsed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Reading a config file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Serialized as the error message string for the frontend.
impl Serialize for ClipForgeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for ClipForgeError {
    fn from(msg: String) -> Self {
        ClipForgeError::Other(msg)
    }
}

impl From<&str> for ClipForgeError {
    fn from(msg: &str) -> Self {
        ClipForgeError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// # Example
/// ```ignore
/// use crate::error::{ResultExt, ClipForgeResult};
///
/// fn load(path: &Path) -> ClipForgeResult<String> {
///     std::fs::read_to_string(path).context("failed to read editor config")
/// }
/// ```
pub trait ResultExt<T> {
    /// Add context to an error, converting it to ClipForgeError::Other.
    fn context(self, msg: &str) -> ClipForgeResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> ClipForgeResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> ClipForgeResult<T> {
        self.map_err(|e| ClipForgeError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> ClipForgeResult<T> {
        self.map_err(|e| ClipForgeError::Other(format!("{}: {}", f(), e)))
    }
}

/// Type alias for Results using ClipForgeError.
pub type ClipForgeResult<T> = Result<T, ClipForgeError>;
