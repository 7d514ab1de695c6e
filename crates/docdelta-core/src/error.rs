use std::path::PathBuf;

use crate::model::Side;

#[derive(Debug, thiserror::Error)]
pub enum DocDeltaError {
    #[error("one or both files do not exist: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("differ output does not match the {side} text: cursor at {cursor}, text length {expected}")]
    DiffContract {
        side: Side,
        cursor: usize,
        expected: usize,
    },

    #[error("failed to load options from {}: {reason}", path.display())]
    OptionsLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    OptionsInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
