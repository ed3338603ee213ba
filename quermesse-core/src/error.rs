//! Error types for the quermesse pipeline.

use thiserror::Error;

/// Errors that can occur while configuring or running the pipeline.
///
/// Geocoding misses and malformed calendar entries are not errors: they are
/// recorded as dropped entries by the enricher.
#[derive(Error, Debug)]
pub enum QuermesseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar service responded with HTTP {status}")]
    Fetch { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not decode calendar response: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QuermesseError {
    /// Whether this error came from talking to the calendar service.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            QuermesseError::Fetch { .. } | QuermesseError::Http(_) | QuermesseError::Decode(_)
        )
    }
}

/// Result type alias for quermesse operations.
pub type QuermesseResult<T> = Result<T, QuermesseError>;
