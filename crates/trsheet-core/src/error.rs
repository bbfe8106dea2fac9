use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrSheetError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("TR {request_id}: invalid requested date '{text}': {reason}")]
    InvalidDate {
        request_id: String,
        text: String,
        reason: String,
    },

    #[error("failed to load rules from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid rules: {0}")]
    RulesInvalid(String),

    #[error("failed to write spreadsheet: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
