//! Ritual rules for the Offering Table.
//!
//! Provides the static sacrifice catalog, validated player profiles, the
//! bonus calculator, an injectable random source, the weighted outcome
//! resolver, and the reward generator used for partial successes.

pub mod bonus;
pub mod error;
pub mod motivation;
pub mod profile;
pub mod random;
pub mod resolver;
pub mod reward;
pub mod tier;

pub use bonus::{BonusBreakdown, calculate_bonus, vip_bonus};
pub use error::{ValidationError, ValidationResult};
pub use profile::{PlayerProfile, ProfileInput, VipLevel};
pub use random::{RandomSource, ScriptedSource, SeededSource};
pub use resolver::{Odds, OutcomeType, Resolution, RitualOutcome, adjusted_odds, resolve};
pub use reward::{CostumeCategory, CostumePick, PosePick, PoseRarity, RewardBundle};
pub use tier::{BonusRule, CATALOG, SacrificeTier, TierKey};
