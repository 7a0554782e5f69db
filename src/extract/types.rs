//! Extraction types
//!
//! Defines the wire shape of an extraction result and the errors the
//! vision backends can produce.

use serde::{Deserialize, Serialize};

/// Vision model backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionBackend {
    /// Google Gemini vision API
    Gemini,
    /// Ollama vision model (local LLM)
    Ollama,
}

impl Default for VisionBackend {
    fn default() -> Self {
        Self::Gemini
    }
}

/// Bibliographic fields extracted from a cover image.
///
/// Always carries exactly these five keys; a field the model could not
/// read is an empty string, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub grade_level: String,
    pub subject: String,
    pub series: String,
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Vision backend not configured: {0}")]
    NotConfigured(String),

    #[error("Vision model call failed: {0}")]
    Upstream(String),

    #[error("Model response is not valid JSON: {0}")]
    InvalidResponse(String),
}

impl ExtractError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
