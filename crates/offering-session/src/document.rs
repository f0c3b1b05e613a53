//! The shared ritual session document.
//!
//! Fields are only ever added as the status advances; the whole document is
//! deleted on reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use offering_core::{
    BonusBreakdown, PlayerProfile, RitualOutcome, SacrificeTier, TierKey, calculate_bonus,
};

/// Where a ritual session stands. Absence of a document means no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// Player submitted a profile; the approver has to confirm it.
    AwaitingApproverConfirmation,
    /// Approver confirmed; the player has to pick a tier.
    ApproverConfirmed,
    /// Tier picked; the approver has to approve.
    AwaitingApproverApproval,
    /// Outcome drawn and stored.
    Resolved,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingApproverConfirmation => write!(f, "awaiting approver confirmation"),
            Self::ApproverConfirmed => write!(f, "approver confirmed"),
            Self::AwaitingApproverApproval => write!(f, "awaiting approver approval"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// The single session document both roles observe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualSession {
    /// Assigned at creation, kept by every transition.
    pub id: Uuid,
    /// Current status.
    pub status: SessionStatus,
    /// Player profile, present from creation on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerProfile>,
    /// Selected tier, present from `AwaitingApproverApproval` on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sacrifice_key: Option<TierKey>,
    /// Set at creation and again on approver confirmation.
    pub created_at: DateTime<Utc>,
    /// Outcome, present only once `Resolved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RitualOutcome>,
}

impl RitualSession {
    /// A fresh session for a validated player.
    pub fn open(player: PlayerProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: SessionStatus::AwaitingApproverConfirmation,
            player: Some(player),
            sacrifice_key: None,
            created_at: now,
            result: None,
        }
    }

    /// Whether the present fields match what the status requires.
    pub fn is_consistent(&self) -> bool {
        let has_tier = self.sacrifice_key.is_some();
        let has_result = self.result.is_some();
        self.player.is_some()
            && match self.status {
                SessionStatus::AwaitingApproverConfirmation | SessionStatus::ApproverConfirmed => {
                    !has_tier && !has_result
                }
                SessionStatus::AwaitingApproverApproval => has_tier && !has_result,
                SessionStatus::Resolved => has_tier && has_result,
            }
    }

    /// The selected tier's catalog entry.
    pub fn tier(&self) -> Option<&'static SacrificeTier> {
        self.sacrifice_key.map(TierKey::tier)
    }

    /// Bonus breakdown for the stored player.
    pub fn bonus(&self) -> Option<BonusBreakdown> {
        self.player.as_ref().map(calculate_bonus)
    }
}
