//! Error types for ritual input validation.

use thiserror::Error;

/// Result type for validation of player input.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Bad player input. Recovered locally and shown to the acting role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name or VIP level left empty.
    #[error("please enter a player name and VIP level")]
    MissingProfileFields,

    /// Name longer than the allowed maximum.
    #[error("player name can be at most {max} characters (got {len})")]
    NameTooLong {
        /// Characters in the submitted name.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// VIP level is not a single digit 1-9.
    #[error("VIP level must be a single digit 1-9, got \"{0}\"")]
    InvalidVip(String),

    /// A pledge answer was not exactly `Y` or `N`.
    #[error("answer the {question} pledge with Y or N only, got \"{value}\"")]
    InvalidAnswer {
        /// Which pledge question was answered.
        question: &'static str,
        /// The rejected answer.
        value: String,
    },

    /// The selected tier is not in the catalog.
    #[error("unknown sacrifice tier: {0}")]
    UnknownTier(String),
}
