//! Error taxonomy for the landing page. None of these ever escape a system: missing elements
//! fall through to a fallback timer and clipboard failures turn into an error flash.

use thiserror::Error;

/// Failures talking to the system clipboard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform clipboard API could not be opened - the fallback writer gets a turn.
    #[error("platform clipboard unavailable: {0}")]
    Unavailable(String),
    /// The platform clipboard opened but refused the text.
    #[error("clipboard write failed: {0}")]
    Write(String),
    /// Every fallback copy command failed or none exists on this platform.
    #[error("fallback copy failed: {0}")]
    Fallback(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LandingError {
    #[error("required UI element `{element}` not found")]
    MissingElement { element: &'static str },
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl LandingError {
    pub const fn missing(element: &'static str) -> Self { Self::MissingElement { element } }
}
