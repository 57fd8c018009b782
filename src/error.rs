//! Error types for the notebook renderer
//!
//! Every fallible operation in the crate returns [`RendererResult`]. Problems
//! that the renderer recovers from locally (empty strokes, missing templates,
//! unknown block kinds) are logged instead and never reach this type.

use thiserror::Error;

/// Custom error type for renderer operations
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Unknown tool id: {0}")]
    UnknownTool(i64),

    #[error("Invalid color index: {0}")]
    InvalidColorIndex(i64),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("No current page")]
    NoCurrentPage,

    #[error("A page is already open")]
    PageAlreadyOpen,

    #[error("Document has already been saved")]
    DocumentSaved,
}

/// Result type alias for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;

/// Helper to convert serde_json errors
impl From<serde_json::Error> for RendererError {
    fn from(err: serde_json::Error) -> Self {
        RendererError::Decode(err.to_string())
    }
}
