//! Error types for date and time normalization.

use thiserror::Error;

/// Why a raw date or time string could not be normalized.
///
/// None of these are fatal: callers keep the user's raw text and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("'{input}' is not a recognized date or time")]
    ParseFailure { input: String },

    #[error("'{input}' is not a real calendar date ({year}-{month:02}-{day:02})")]
    InvalidCalendarDate {
        input: String,
        year: i32,
        month: u32,
        day: u32,
    },

    #[error("'{input}' is not a valid time of day ({hour}:{minute:02})")]
    InvalidClockTime {
        input: String,
        hour: u32,
        minute: u32,
    },
}

impl NormalizeError {
    pub(crate) fn parse_failure(input: &str) -> Self {
        Self::ParseFailure {
            input: input.to_string(),
        }
    }

    /// The raw text that failed to normalize.
    pub fn input(&self) -> &str {
        match self {
            Self::ParseFailure { input }
            | Self::InvalidCalendarDate { input, .. }
            | Self::InvalidClockTime { input, .. } => input,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
