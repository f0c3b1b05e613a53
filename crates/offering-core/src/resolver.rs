//! Weighted outcome resolution for a ritual.
//!
//! The tier's baseline odds are shifted by the player bonus, clamped for the
//! "full" tier, and a single percentage roll picks the outcome:
//!
//! ```text
//! 0 ......... success ......... success+partial ......... 100
//! |   Success   |     Partial      |          Fail         |
//! ```
//!
//! After the fail-floor clamp the three values may sum to less than 100.
//! Rolls landing in that gap count as Fail.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::motivation;
use crate::random::RandomSource;
use crate::reward::RewardBundle;
use crate::tier::{BonusRule, SacrificeTier};

/// Outcome of a resolved ritual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeType {
    /// The player claims the dream reward.
    Success,
    /// The player earns a reward bundle.
    Partial,
    /// No reward.
    Fail,
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Partial => write!(f, "Partial Success"),
            Self::Fail => write!(f, "Fail"),
        }
    }
}

/// Success, partial, and fail chances in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Odds {
    /// Success chance.
    pub success: i32,
    /// Partial success chance.
    pub partial: i32,
    /// Fail chance.
    pub fail: i32,
}

impl Odds {
    /// Baseline odds of a tier.
    pub fn base(tier: &SacrificeTier) -> Self {
        Self {
            success: tier.base_success_pct,
            partial: tier.base_partial_pct,
            fail: tier.base_fail_pct,
        }
    }

    /// Sum of all three chances.
    pub fn total(&self) -> i32 {
        self.success + self.partial + self.fail
    }

    /// Classify a roll in `[0, 100)`.
    pub fn classify(&self, roll: f64) -> OutcomeType {
        let success = f64::from(self.success);
        let partial_end = success + f64::from(self.partial);
        if roll < success {
            OutcomeType::Success
        } else if roll < partial_end {
            OutcomeType::Partial
        } else {
            OutcomeType::Fail
        }
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.success, self.partial, self.fail)
    }
}

/// The bonus a tier actually applies.
///
/// Negative bonuses count as 0. A standard tier never moves more than its
/// fail chance, and the fail-floor tier caps the bonus at 100, so every
/// adjusted chance stays non-negative.
pub fn effective_bonus(tier: &SacrificeTier, total_bonus_pct: i32) -> i32 {
    match tier.bonus_rule() {
        BonusRule::Immune => 0,
        BonusRule::Standard => total_bonus_pct.clamp(0, tier.base_fail_pct),
        BonusRule::FailFloor => total_bonus_pct.clamp(0, 100),
    }
}

/// Odds of a tier after applying the bonus and the tier's clamp rule.
pub fn adjusted_odds(tier: &SacrificeTier, total_bonus_pct: i32) -> Odds {
    let bonus = effective_bonus(tier, total_bonus_pct);
    let mut odds = Odds::base(tier);
    odds.success += bonus;
    odds.fail -= bonus;

    if tier.bonus_rule() == BonusRule::FailFloor && odds.fail < 1 {
        let deficit = 1 - odds.fail;
        odds.fail = 1;
        odds.partial = (odds.partial - deficit).max(1);
        let overage = odds.total() - 100;
        if overage > 0 {
            odds.success = (odds.success - overage).max(1);
        }
    }

    odds
}

/// The result stored on the shared session document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualOutcome {
    /// Outcome drawn.
    pub outcome_type: OutcomeType,
    /// Message shown to both roles.
    pub message: String,
}

/// Everything produced by one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The storable outcome.
    pub outcome: RitualOutcome,
    /// The percentage roll that decided it.
    pub roll: f64,
    /// Odds in effect for the roll.
    pub odds: Odds,
    /// Reward bundle, present only for partial successes.
    pub reward: Option<RewardBundle>,
}

/// Resolve a ritual for a tier and accumulated bonus.
///
/// Draws, in order: the outcome roll, the motivational line, and for a
/// partial success the four reward picks.
pub fn resolve(
    tier: &SacrificeTier,
    total_bonus_pct: i32,
    rng: &mut dyn RandomSource,
) -> Resolution {
    let odds = adjusted_odds(tier, total_bonus_pct);
    let roll = rng.roll_percent();
    let outcome_type = odds.classify(roll);
    let line = motivation::pick(outcome_type, rng);

    let reward = (outcome_type == OutcomeType::Partial).then(|| RewardBundle::generate(rng));
    let message = match &reward {
        Some(bundle) => format!("{line}\n{bundle}"),
        None => line.to_string(),
    };

    debug!(
        tier = %tier.key,
        bonus = total_bonus_pct,
        %odds,
        roll,
        outcome = ?outcome_type,
        "ritual resolved"
    );

    Resolution {
        outcome: RitualOutcome {
            outcome_type,
            message,
        },
        roll,
        odds,
        reward,
    }
}
