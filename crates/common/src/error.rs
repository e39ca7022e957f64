//! Error types shared across Blackout crates.

/// Top-level error type for Blackout operations.
#[derive(Debug, thiserror::Error)]
pub enum BlackoutError {
    #[error("Overlay error: {message}")]
    Overlay { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using BlackoutError.
pub type BlackoutResult<T> = Result<T, BlackoutError>;

impl BlackoutError {
    pub fn overlay(msg: impl Into<String>) -> Self {
        Self::Overlay {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
