use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("pdftoppm not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftoppmNotFound,

    #[error("pdftoppm failed with exit code {code}: {stderr}")]
    PdftoppmFailed { code: i32, stderr: String },

    #[error("document analysis failed: {0}")]
    Analyze(String),

    #[error("aws CLI not found. Install it and configure credentials to call the analysis service")]
    AwsCliNotFound,

    #[error("analysis service call failed with exit code {code}: {stderr}")]
    AnalyzeFailed { code: i32, stderr: String },

    #[error("failed to load analysis response from {path}: {reason}")]
    ResponseLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
