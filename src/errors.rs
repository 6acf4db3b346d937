/*!
 * Error types for the capsync engine.
 *
 * The pure subtitle engine reports failures through `SubtitleError`,
 * application code wraps everything into `AppError`.
 */

use thiserror::Error;

/// Errors raised by the subtitle engine itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timeline cannot be rescaled onto the requested duration
    #[error("Invalid duration: cannot scale a {current_duration}s timeline to {target_duration}s")]
    InvalidDuration {
        /// Requested duration in seconds
        target_duration: f64,
        /// End time of the last segment of the source track
        current_duration: f64,
    },

    /// A segment with an unusable time range was handed to the renderer
    #[error("Invalid time range for segment {sequence}: start {start_time}s, end {end_time}s")]
    InvalidTimeRange {
        /// Sequence number of the offending segment
        sequence: usize,
        /// Start time in seconds
        start_time: f64,
        /// End time in seconds
        end_time: f64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the subtitle engine
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
