//! Error types for the skillet engine.

use thiserror::Error;

/// A shared error type for the skillet engine.
///
/// Only two things can fail inside one turn: decoding the inbound envelope
/// and serializing the outbound one. A missing handler is deliberately not
/// an error; dispatch treats it as a normal no-op outcome.
#[derive(Error, Debug, Clone)]
pub enum SkillError {
    /// The inbound payload was malformed for the variant selected by its
    /// discriminator. Fatal to the turn; no partial request is produced.
    #[error("malformed {variant} payload: {message}")]
    Decode {
        variant: &'static str,
        message: String,
    },

    /// The outbound envelope could not be serialized.
    #[error("response serialization failed: {0}")]
    Serialize(String),
}

impl SkillError {
    /// Creates a Decode error for the given request variant.
    pub fn decode(variant: &'static str, err: &serde_json::Error) -> Self {
        Self::Decode {
            variant,
            message: err.to_string(),
        }
    }

    /// Check if this is a Decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// A type alias for `Result<T, SkillError>`.
pub type Result<T> = std::result::Result<T, SkillError>;
