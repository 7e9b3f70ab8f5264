//! Question bank load error types.
//!
//! A failed load is terminal for the session: the view switches to a
//! load-failed state and the source is never retried. Keeping the two
//! failure shapes apart lets front ends word the message without string
//! matching.

use thiserror::Error;

/// Errors that can occur while loading the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source could not be read or fetched.
    #[error("question source unreachable ({source_name}): {message}")]
    Unreachable {
        source_name: String,
        message: String,
    },

    /// The source was read but its content is not a question list.
    #[error("malformed question data ({source_name}): {message}")]
    Malformed {
        source_name: String,
        message: String,
    },
}

impl LoadError {
    /// Human-readable name of the source that failed.
    pub fn source_name(&self) -> &str {
        match self {
            LoadError::Unreachable { source_name, .. } | LoadError::Malformed { source_name, .. } => {
                source_name
            }
        }
    }

    /// Returns `true` if the data arrived but could not be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, LoadError::Malformed { .. })
    }
}
