//! Bonus calculation from a player's pledges and VIP tier.
//!
//! The bonus is a number of percentage points moved from fail to success
//! when the ritual is resolved.

use serde::{Deserialize, Serialize};

use crate::profile::{PlayerProfile, VipLevel};

/// Bonus for pledging at least 3 legendary photos.
pub const LEGENDARY_BONUS_PCT: i32 = 2;

/// Bonus for pledging at least 4 epic photos.
pub const EPIC_BONUS_PCT: i32 = 1;

/// The accumulated bonus and why it was granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusBreakdown {
    /// Total bonus in percentage points.
    pub total_bonus_pct: i32,
    /// One line per granted bonus, in rule order.
    pub explanations: Vec<String>,
}

/// VIP bonus lookup. Levels below 4 grant nothing.
pub fn vip_bonus(level: VipLevel) -> i32 {
    match level.value() {
        4 => 1,
        5 => 2,
        6 => 3,
        7 => 4,
        8 => 5,
        9 => 7,
        _ => 0,
    }
}

/// Compute the bonus for a profile.
pub fn calculate_bonus(profile: &PlayerProfile) -> BonusBreakdown {
    let mut breakdown = BonusBreakdown::default();

    if profile.will_burn_legendary {
        breakdown.total_bonus_pct += LEGENDARY_BONUS_PCT;
        breakdown.explanations.push(format!(
            "≥3 legendary photos pledged: +{LEGENDARY_BONUS_PCT}% chance"
        ));
    }

    if profile.will_burn_epic {
        breakdown.total_bonus_pct += EPIC_BONUS_PCT;
        breakdown
            .explanations
            .push(format!("≥4 epic photos pledged: +{EPIC_BONUS_PCT}% chance"));
    }

    let vip = vip_bonus(profile.vip_level);
    if vip > 0 {
        breakdown.total_bonus_pct += vip;
        breakdown
            .explanations
            .push(format!("VIP bonus: +{vip}% chance"));
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileInput;

    fn profile(vip: &str, legendary: &str, epic: &str) -> PlayerProfile {
        ProfileInput::new("Mira", vip, legendary, epic)
            .validate()
            .unwrap()
    }

    #[test]
    fn all_bonuses_stack() {
        let b = calculate_bonus(&profile("6", "Y", "Y"));
        assert_eq!(b.total_bonus_pct, 6);
        insta::assert_snapshot!(b.explanations.join("\n"), @r"
        ≥3 legendary photos pledged: +2% chance
        ≥4 epic photos pledged: +1% chance
        VIP bonus: +3% chance
        ");
    }

    #[test]
    fn low_vip_contributes_nothing() {
        for vip in ["1", "2", "3"] {
            let b = calculate_bonus(&profile(vip, "Y", "N"));
            assert_eq!(b.total_bonus_pct, 2, "vip {vip}");
            assert_eq!(b.explanations.len(), 1);
        }
    }

    #[test]
    fn vip_table() {
        let expected = [0, 0, 0, 1, 2, 3, 4, 5, 7];
        for (level, bonus) in (1u8..=9).zip(expected) {
            let level = VipLevel::try_from(level).unwrap();
            assert_eq!(vip_bonus(level), bonus, "vip {level}");
        }
    }

    #[test]
    fn no_pledges_no_vip() {
        let b = calculate_bonus(&profile("1", "N", "N"));
        assert_eq!(b, BonusBreakdown::default());
    }

    #[test]
    fn maximum_bonus() {
        let b = calculate_bonus(&profile("9", "Y", "Y"));
        assert_eq!(b.total_bonus_pct, 10);
        assert_eq!(b.explanations[2], "VIP bonus: +7% chance");
    }
}
