//! Error types for the Sparkle domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Backend failures are deliberately separated from caller errors: the former
//! are recovered locally by the rule-based fallback responder and never reach
//! the learner, while the latter (bad input, unknown ids) surface to the caller.

use thiserror::Error;

/// The top-level error type for all Sparkle operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Backend errors ---
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Curriculum errors ---
    #[error("Curriculum error: {0}")]
    Curriculum(#[from] CurriculumError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures from the generative text backend. All of these are recoverable:
/// the Response Generator falls back to templated replies on any variant.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by backend, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed backend output: {0}")]
    MalformedOutput(String),
}

/// Caller-facing session errors. None of these are retried internally.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No next lesson: '{current}' is the last lesson of {tier}")]
    NoNextLesson { current: String, tier: String },

    #[error("Session is closed: {0}")]
    Closed(String),
}

#[derive(Debug, Clone, Error)]
pub enum CurriculumError {
    #[error("Lesson not found: {0}")]
    LessonNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_displays_correctly() {
        let err = Error::Backend(BackendError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn session_error_displays_correctly() {
        let err = Error::Session(SessionError::NoNextLesson {
            current: "mw_005".into(),
            tier: "Magic Workshop".into(),
        });
        assert!(err.to_string().contains("mw_005"));
        assert!(err.to_string().contains("Magic Workshop"));
    }

    #[test]
    fn lesson_not_found_displays_id() {
        let err = Error::Curriculum(CurriculumError::LessonNotFound("zz_999".into()));
        assert!(err.to_string().contains("zz_999"));
    }
}
