//! Error types for value resolution.
//!
//! "No match" is never an error; it is `Ok(false)` from the matcher and routes
//! to the fallback in the evaluator. A `MatchError` only comes out of
//! user-supplied code: accessors, entity resolvers, guards and handlers. The
//! engine propagates these unchanged and never recovers from them.

use thiserror::Error;

/// Result of resolving a value or running a user callable.
pub type MatchResult<T> = Result<T, MatchError>;

/// Failure raised by a user-supplied callable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A computed entity was asked for a field it does not have.
    #[error("there is no field [{name}] for this item")]
    UnknownField { name: String },

    /// Input could not be read as a JSON document of the expected shape.
    #[error("invalid json: {message}")]
    Json { message: String },

    /// Free-form failure from a guard, handler or accessor.
    #[error("{message}")]
    Custom { message: String },
}

impl MatchError {
    /// Create a free-form error.
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        MatchError::Custom {
            message: message.into(),
        }
    }
}

/// Missing field on a computed entity.
#[cold]
pub fn unknown_field(name: &str) -> MatchError {
    MatchError::UnknownField {
        name: name.to_string(),
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Json {
            message: err.to_string(),
        }
    }
}
