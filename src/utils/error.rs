//! Error types for the retouching session controller.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use serde::Serialize;
use thiserror::Error;

/// Locally detected precondition failures.
///
/// None of these variants involve a network round-trip: they are raised
/// before a request is built and leave the session untouched.
#[derive(Error, Debug, Clone, Serialize, PartialEq)]
pub enum ValidationError {
    /// The chosen file does not declare an image content type
    #[error("Not an image file: {0}")]
    NotAnImage(String),
    /// An operation was requested before any upload completed
    #[error("Upload an image before applying operations")]
    UploadRequired,
    /// Download was requested with no image in the session
    #[error("No image to download")]
    NothingToDownload,
    /// Reset was requested before any upload completed
    #[error("No uploaded image to reset to")]
    NothingToReset,
    /// A request was issued while another one is still unresolved
    #[error("Busy: {0}")]
    Busy(String),
    /// An operation string could not be parsed (CLI input)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Main error type for the editing session.
///
/// Every failure surfaced to the user is one of these; all of them return
/// the session to its last good state.
#[derive(Error, Debug, Clone, Serialize, PartialEq)]
pub enum EditorError {
    /// A local precondition check failed
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The service answered with `success: false`; carries its message
    #[error("Server error: {0}")]
    Remote(String),

    /// The request never produced a usable response
    #[error("Network error: {0}")]
    Transport(String),
}

/// Convenience result type for session operations.
pub type EditorResult<T> = Result<T, EditorError>;

// Helper methods for error creation
impl EditorError {
    pub fn remote<T: Into<String>>(msg: T) -> Self {
        Self::Remote(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        Self::Transport(msg.into())
    }

    /// True for errors raised before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Convert reqwest errors (connect, timeout, body decode) to EditorError
impl From<reqwest::Error> for EditorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

// Convert std::io::Error (ingress file reads) to EditorError
impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
