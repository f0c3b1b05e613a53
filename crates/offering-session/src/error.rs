//! Error types for ritual session operations.

use thiserror::Error;

use offering_core::ValidationError;

use crate::document::SessionStatus;
use crate::store::StoreError;

/// Result type for session operations.
pub type RitualResult<T> = Result<T, RitualError>;

/// The kind of event a role attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Player submits a profile.
    SubmitProfile,
    /// Approver confirms the player.
    Confirm,
    /// Player selects a sacrifice tier.
    SelectTier,
    /// Approver approves and resolves the ritual.
    Approve,
    /// Either role deletes the session.
    Reset,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitProfile => write!(f, "submit a profile"),
            Self::Confirm => write!(f, "confirm the player"),
            Self::SelectTier => write!(f, "select a tier"),
            Self::Approve => write!(f, "approve the ritual"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Errors surfaced to the acting role. None of them are fatal.
#[derive(Debug, Error)]
pub enum RitualError {
    /// Bad player input; nothing was written.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The event is not allowed in the current status; nothing was written.
    #[error("cannot {event} while {}", status_label(.status))]
    IllegalTransition {
        /// Event attempted.
        event: EventKind,
        /// Status at the time, `None` when no session exists.
        status: Option<SessionStatus>,
    },

    /// The store rejected or failed the operation; the last good state stands.
    #[error("{0}")]
    Store(#[from] StoreError),
}

fn status_label(status: &Option<SessionStatus>) -> String {
    match status {
        Some(s) => format!("the session is {s}"),
        None => "no session exists".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_transition_message() {
        let err = RitualError::IllegalTransition {
            event: EventKind::SelectTier,
            status: Some(SessionStatus::AwaitingApproverConfirmation),
        };
        assert_eq!(
            err.to_string(),
            "cannot select a tier while the session is awaiting approver confirmation"
        );

        let err = RitualError::IllegalTransition {
            event: EventKind::Approve,
            status: None,
        };
        assert_eq!(
            err.to_string(),
            "cannot approve the ritual while no session exists"
        );
    }

    #[test]
    fn validation_passes_message_through() {
        let err = RitualError::from(ValidationError::MissingProfileFields);
        assert_eq!(err.to_string(), "please enter a player name and VIP level");
    }
}
