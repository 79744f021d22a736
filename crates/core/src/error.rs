//! Error taxonomy for the editor core

use std::path::PathBuf;

use thiserror::Error;

use crate::shape::MAX_VERTICES;

/// Everything that can go wrong in the core or at its collaborator
/// boundaries. Dialog cancellation is user intent, not an error, and
/// is reported as `Ok(None)` by the operations that can be cancelled.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The shape already holds [`MAX_VERTICES`] vertices. Never shown
    /// to the user; insertion silently does nothing.
    #[error("shape is at capacity ({MAX_VERTICES} vertices)")]
    CapacityExceeded,

    #[error("failed to read {}: {message}", path.display())]
    FileRead { path: PathBuf, message: String },

    #[error("failed to write {}: {message}", path.display())]
    FileWrite { path: PathBuf, message: String },

    /// Sprite loading only; the caller falls back to the default sprite.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The platform file picker reported an error.
    #[error("file dialog failed: {0}")]
    Dialog(String),
}
