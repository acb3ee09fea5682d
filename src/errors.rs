/*!
 * Error types for the subprose application.
 *
 * Subtitle normalization itself never fails; these types cover fetching
 * subtitles through the external tool and the application shell around it,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while fetching subtitles with the external tool
#[derive(Error, Debug)]
pub enum FetchError {
    /// The video URL is missing, malformed or not http(s)
    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    /// The extraction tool could not be started
    #[error("Subtitle tool not found: {0}")]
    ToolNotFound(String),

    /// The extraction tool exited with a failure status
    #[error("Subtitle tool failed ({status}): {message}")]
    ToolFailed {
        /// Exit status as reported by the OS
        status: String,
        /// Meaningful lines of the tool's error output
        message: String,
    },

    /// The video platform throttled the request (HTTP 429)
    #[error("Rate limited by the video platform (HTTP 429), wait a while or use a cookies file: {0}")]
    RateLimited(String),

    /// The extraction tool ran longer than the configured timeout
    #[error("Subtitle tool timed out after {0} seconds")]
    Timeout(u64),

    /// The tool finished but produced no subtitle file
    #[error("No subtitles (manual or automatic) found for video: {0}")]
    NoSubtitles(String),

    /// Temp directory or subtitle file access failed
    #[error("Subtitle file error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Whether retrying later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Timeout(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while fetching subtitles
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
