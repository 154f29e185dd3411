// src/error.rs
// =============================================================================
// Error types for the analysis pipeline.
//
// Every failure an analysis can hit is one variant of AnalyzeError.
// The HTTP layer turns them into status codes with status_code():
// - Input             -> 400 (the caller can fix it)
// - everything else   -> 500
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets `?` convert a reqwest::Error into AnalyzeError automatically
// =============================================================================

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Missing or malformed request parameters (repo, api key)
    #[error("{0}")]
    Input(String),

    /// GitHub or the completion API answered with a non-success status
    #[error("upstream request to {url} failed with status {status}: {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    /// A single file's content could not be fetched or decoded as text.
    /// The walker recovers from this one locally.
    #[error("could not decode {url}: {reason}")]
    Decoding { url: String, reason: String },

    /// The completion API answered 200 but without choices[0].message.content
    #[error("completion response has no choices[0].message.content")]
    MalformedResponse,

    /// Connection-level failure (DNS, refused connection, broken body)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AnalyzeError {
    pub fn input(message: impl Into<String>) -> Self {
        AnalyzeError::Input(message.into())
    }

    /// The HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyzeError::Input(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::Upstream { .. }
            | AnalyzeError::Decoding { .. }
            | AnalyzeError::MalformedResponse
            | AnalyzeError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
