//! The static sacrifice catalog.
//!
//! Each tier burns a number of photos and carries fixed baseline odds for
//! success, partial success, and failure. The odds of every tier sum to 100.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Key identifying a sacrifice tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKey {
    /// Coward's Sacrifice.
    Coward,
    /// Tiny Sacrifice.
    Tiny,
    /// High Sacrifice.
    High,
    /// Full Sacrifice, the second-highest tier.
    Full,
    /// Absolute Sacrifice, the top tier.
    Absolute,
}

impl TierKey {
    /// Parse a tier key from user input (case-insensitive).
    pub fn parse(s: &str) -> ValidationResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "coward" => Ok(Self::Coward),
            "tiny" => Ok(Self::Tiny),
            "high" => Ok(Self::High),
            "full" => Ok(Self::Full),
            "absolute" => Ok(Self::Absolute),
            _ => Err(ValidationError::UnknownTier(s.to_string())),
        }
    }

    /// All tier keys from weakest to strongest.
    pub fn all() -> &'static [Self] {
        &[
            Self::Coward,
            Self::Tiny,
            Self::High,
            Self::Full,
            Self::Absolute,
        ]
    }

    /// The catalog entry for this key.
    pub fn tier(self) -> &'static SacrificeTier {
        let index = match self {
            Self::Coward => 0,
            Self::Tiny => 1,
            Self::High => 2,
            Self::Full => 3,
            Self::Absolute => 4,
        };
        &CATALOG[index]
    }

    /// The lowercase key string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coward => "coward",
            Self::Tiny => "tiny",
            Self::High => "high",
            Self::Full => "full",
            Self::Absolute => "absolute",
        }
    }
}

impl std::fmt::Display for TierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the accumulated player bonus is applied to a tier's odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusRule {
    /// Bonus moves points from fail to success unchanged.
    Standard,
    /// Like `Standard`, but fail is floored at 1 and partial/success absorb
    /// the deficit.
    FailFloor,
    /// Bonus is ignored.
    Immune,
}

/// A named sacrifice option with baseline odds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SacrificeTier {
    /// Catalog key.
    pub key: TierKey,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Photos burned by this sacrifice.
    pub photos_burned: u32,
    /// Baseline success chance, in percent.
    pub base_success_pct: i32,
    /// Baseline partial success chance, in percent.
    pub base_partial_pct: i32,
    /// Baseline fail chance, in percent.
    pub base_fail_pct: i32,
    /// Display icon.
    pub icon: &'static str,
}

impl SacrificeTier {
    /// How this tier treats the player bonus.
    pub fn bonus_rule(&self) -> BonusRule {
        match self.key {
            TierKey::Absolute => BonusRule::Immune,
            TierKey::Full => BonusRule::FailFloor,
            _ => BonusRule::Standard,
        }
    }

    /// Look up a tier by user-supplied key.
    pub fn find(key: &str) -> ValidationResult<&'static Self> {
        TierKey::parse(key).map(TierKey::tier)
    }
}

impl std::fmt::Display for SacrificeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (burn {}, {}/{}/{})",
            self.icon,
            self.display_name,
            self.photos_burned,
            self.base_success_pct,
            self.base_partial_pct,
            self.base_fail_pct,
        )
    }
}

/// The sacrifice catalog, weakest to strongest. Indexed by `TierKey` order.
pub const CATALOG: [SacrificeTier; 5] = [
    SacrificeTier {
        key: TierKey::Coward,
        display_name: "Coward's Sacrifice",
        photos_burned: 3,
        base_success_pct: 10,
        base_partial_pct: 30,
        base_fail_pct: 60,
        icon: "🐇",
    },
    SacrificeTier {
        key: TierKey::Tiny,
        display_name: "Tiny Sacrifice",
        photos_burned: 5,
        base_success_pct: 25,
        base_partial_pct: 45,
        base_fail_pct: 30,
        icon: "🕯️",
    },
    SacrificeTier {
        key: TierKey::High,
        display_name: "High Sacrifice",
        photos_burned: 7,
        base_success_pct: 50,
        base_partial_pct: 35,
        base_fail_pct: 15,
        icon: "🔥",
    },
    SacrificeTier {
        key: TierKey::Full,
        display_name: "Full Sacrifice",
        photos_burned: 9,
        base_success_pct: 75,
        base_partial_pct: 20,
        base_fail_pct: 5,
        icon: "💎",
    },
    SacrificeTier {
        key: TierKey::Absolute,
        display_name: "Absolute Sacrifice",
        photos_burned: 12,
        base_success_pct: 95,
        base_partial_pct: 4,
        base_fail_pct: 1,
        icon: "👑",
    },
];
