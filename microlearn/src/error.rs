//! Error types for course generation
//!
//! Provider-level errors (`ProviderError`, `SearchError`) stay inside the
//! generator and curator. Only `CourseError` crosses the orchestrator
//! boundary, and only its validation variant carries a caller-visible message.

use thiserror::Error;

/// Failure category, independent of the concrete error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Generation,
    CurationFallbackUsed,
    Unexpected,
}

/// Rule broken by a raw topic string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Topic must be a non-empty string")]
    Empty,

    #[error("Topic must be {max} characters or less")]
    TooLong { max: usize },

    #[error("Topic must contain at least one valid character")]
    NoValidCharacters,
}

/// Errors raised by a text-generation provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse provider response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Provider returned no choices")]
    NoChoices,
}

/// Errors raised by a video-search provider client.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },
}

/// Why a syllabus could not be produced.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("text generation provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("text generation timed out after {0}s")]
    Timeout(u64),

    #[error("text generation returned empty content")]
    EmptyContent,

    #[error("generated content is not a valid syllabus: {0}")]
    MalformedContent(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CourseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("syllabus generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl CourseError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CourseError::Validation(_) => FailureKind::Validation,
            CourseError::Generation(_) => FailureKind::Generation,
            CourseError::Unexpected(_) => FailureKind::Unexpected,
        }
    }
}
