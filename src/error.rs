// Error kinds surfaced by the styler.
//
// Every variant's `Display` text is the message shown to the user, so
// the UI can print any of them the same way.

use thiserror::Error;

/// Generic fallback when the service gives nothing more specific.
pub const GENERIC_FAILURE: &str = "Failed to generate image.";

/// Problems detected locally, before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload an image first.")]
    MissingFile,
    #[error("Please choose a style.")]
    MissingStyle,
    #[error("Unknown style: {0}")]
    UnknownStyle(String),
}

/// Failure of a single Generate request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StylerError {
    /// Checked before submission.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure, unexpected status or unreadable payload.
    #[error("{0}")]
    Transport(String),

    /// The service answered with an `error` field.
    #[error("{0}")]
    Service(String),
}

impl StylerError {
    pub fn generic() -> Self {
        StylerError::Transport(GENERIC_FAILURE.to_string())
    }
}

impl From<reqwest::Error> for StylerError {
    fn from(err: reqwest::Error) -> Self {
        StylerError::Transport(format!("Request failed: {err}"))
    }
}
