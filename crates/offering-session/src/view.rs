//! Status-to-step projection for each role.
//!
//! A role's displayed step depends only on the document status; no
//! per-observer state survives a notification.

use crate::document::{RitualSession, SessionStatus};

/// What the player sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStep {
    /// Fill in name, VIP level, and pledges.
    EnterProfile,
    /// Wait for the approver to confirm.
    AwaitingConfirmation,
    /// Pick a sacrifice tier.
    ChooseSacrifice,
    /// Wait for the approver to approve.
    AwaitingApproval,
    /// Show the outcome.
    ShowResult,
}

impl PlayerStep {
    /// Project a status onto the player's step.
    pub fn from_status(status: Option<SessionStatus>) -> Self {
        match status {
            None => Self::EnterProfile,
            Some(SessionStatus::AwaitingApproverConfirmation) => Self::AwaitingConfirmation,
            Some(SessionStatus::ApproverConfirmed) => Self::ChooseSacrifice,
            Some(SessionStatus::AwaitingApproverApproval) => Self::AwaitingApproval,
            Some(SessionStatus::Resolved) => Self::ShowResult,
        }
    }

    /// Project a document (or its absence) onto the player's step.
    pub fn of(document: Option<&RitualSession>) -> Self {
        Self::from_status(document.map(|d| d.status))
    }
}

impl std::fmt::Display for PlayerStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnterProfile => write!(f, "enter profile"),
            Self::AwaitingConfirmation => write!(f, "waiting for approver confirmation"),
            Self::ChooseSacrifice => write!(f, "choose a sacrifice"),
            Self::AwaitingApproval => write!(f, "waiting for approver approval"),
            Self::ShowResult => write!(f, "result"),
        }
    }
}

/// What the approver sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApproverStep {
    /// No session.
    Idle,
    /// Review the submitted player and confirm.
    ReviewPlayer,
    /// Wait for the player to pick a tier.
    AwaitingSelection,
    /// Review the chosen tier and approve.
    ReviewSacrifice,
    /// Show the outcome.
    ShowResult,
}

impl ApproverStep {
    /// Project a status onto the approver's step.
    pub fn from_status(status: Option<SessionStatus>) -> Self {
        match status {
            None => Self::Idle,
            Some(SessionStatus::AwaitingApproverConfirmation) => Self::ReviewPlayer,
            Some(SessionStatus::ApproverConfirmed) => Self::AwaitingSelection,
            Some(SessionStatus::AwaitingApproverApproval) => Self::ReviewSacrifice,
            Some(SessionStatus::Resolved) => Self::ShowResult,
        }
    }

    /// Project a document (or its absence) onto the approver's step.
    pub fn of(document: Option<&RitualSession>) -> Self {
        Self::from_status(document.map(|d| d.status))
    }
}

impl std::fmt::Display for ApproverStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::ReviewPlayer => write!(f, "review player"),
            Self::AwaitingSelection => write!(f, "waiting for tier selection"),
            Self::ReviewSacrifice => write!(f, "review sacrifice"),
            Self::ShowResult => write!(f, "result"),
        }
    }
}
