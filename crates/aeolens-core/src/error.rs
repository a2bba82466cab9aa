//! Error types shared across aeolens

use thiserror::Error;

/// Message shown to the user when an analysis request fails.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while analyzing the URL. Please try again.";

/// Rejections produced while normalizing user-entered URL text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    EmptyInput,

    #[error("Please enter a valid URL (e.g., https://example.com): {reason}")]
    MalformedUrl { input: String, reason: String },
}

/// Contract violations raised by the report presenter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenterError {
    #[error("recommendation count must not be negative")]
    InvalidCount,
}

/// Failure reported by an analyzer for a single request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("analysis timed out after {0} ms")]
    Timeout(u128),

    #[error("unsupported content type: {0}")]
    UnsupportedContent(String),

    #[error("{0}")]
    Other(String),
}

/// Outcome of a rejected or failed session submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an analysis is already in progress")]
    Busy,

    #[error("the analysis request was cancelled")]
    Cancelled,

    #[error(transparent)]
    Analysis(#[from] AnalysisFailure),
}

/// Rejections produced while importing an exported report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} score {score} is outside 0-100")]
    ScoreOutOfRange { field: &'static str, score: u8 },
}
