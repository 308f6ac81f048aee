//! Error types for the equation of time pipeline.

/// Error type for every fallible stage: fetching, parsing, grouping and
/// serializing the table.
#[derive(Debug, thiserror::Error)]
pub enum EotError {
    /// The request could not be built, sent, or its body read (including timeouts).
    #[error("transport error: {reason}")]
    Transport {
        /// Description of the underlying failure.
        reason: String,
    },

    /// The provider answered with a non-success status.
    #[error("HTTP error {status} from {url}")]
    Status {
        /// Status code returned by the provider.
        status: u16,
        /// Request URL without query string.
        url: String,
    },

    /// The response body does not have the expected shape.
    #[error("format error: {reason}")]
    Format {
        /// Description of the parse failure.
        reason: String,
    },

    /// Parsed data does not match the requested window.
    #[error("consistency error: {reason}")]
    Consistency {
        /// Description of the mismatch.
        reason: String,
    },

    /// The configured start year is after the end year.
    #[error("invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },

    /// JSON encoding or decoding of the table failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl EotError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        EotError::Format {
            reason: reason.into(),
        }
    }

    pub(crate) fn consistency(reason: impl Into<String>) -> Self {
        EotError::Consistency {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EotError {
    fn from(e: serde_json::Error) -> Self {
        EotError::Serialization {
            reason: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EotError>;
