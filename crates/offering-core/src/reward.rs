//! Reward bundles granted on a partial success.
//!
//! A bundle holds two costume photo picks and two pose photo picks, each
//! drawn independently.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Costume photo categories, each with its own item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostumeCategory {
    /// 12 items.
    Classic,
    /// 16 items.
    Seasonal,
    /// 8 items.
    Festival,
    /// 8 items.
    Couture,
}

impl CostumeCategory {
    /// All categories in draw order.
    pub fn all() -> &'static [Self] {
        &[Self::Classic, Self::Seasonal, Self::Festival, Self::Couture]
    }

    /// Number of items in this category; items are numbered from 1.
    pub fn item_count(self) -> u32 {
        match self {
            Self::Classic => 12,
            Self::Seasonal => 16,
            Self::Festival | Self::Couture => 8,
        }
    }
}

impl std::fmt::Display for CostumeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "Classic"),
            Self::Seasonal => write!(f, "Seasonal"),
            Self::Festival => write!(f, "Festival"),
            Self::Couture => write!(f, "Couture"),
        }
    }
}

/// Pose photo rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoseRarity {
    /// Rare pose.
    Rare,
    /// Epic pose.
    Epic,
    /// Legendary pose.
    Legendary,
}

impl PoseRarity {
    /// All rarities in draw order.
    pub fn all() -> &'static [Self] {
        &[Self::Rare, Self::Epic, Self::Legendary]
    }
}

impl std::fmt::Display for PoseRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rare => write!(f, "Rare"),
            Self::Epic => write!(f, "Epic"),
            Self::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Poses per rarity.
pub const POSES_PER_RARITY: u32 = 8;

/// One costume photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostumePick {
    /// Category drawn.
    pub category: CostumeCategory,
    /// Item number within the category.
    pub item: u32,
}

impl CostumePick {
    /// Draw a category uniformly, then an item within its range.
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        let categories = CostumeCategory::all();
        let category = categories[rng.pick_index(categories.len())];
        let item = rng.range_inclusive(1, category.item_count());
        Self { category, item }
    }
}

/// One pose photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosePick {
    /// Rarity drawn.
    pub rarity: PoseRarity,
    /// Pose number, 1-8.
    pub number: u32,
}

impl PosePick {
    /// Draw a rarity uniformly, then a pose number 1-8.
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        let rarities = PoseRarity::all();
        let rarity = rarities[rng.pick_index(rarities.len())];
        let number = rng.range_inclusive(1, POSES_PER_RARITY);
        Self { rarity, number }
    }
}

/// Two costume picks and two pose picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    /// Costume photos.
    pub costumes: [CostumePick; 2],
    /// Pose photos.
    pub poses: [PosePick; 2],
}

impl RewardBundle {
    /// Draw a bundle: both costumes first, then both poses.
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        let costumes = [CostumePick::draw(rng), CostumePick::draw(rng)];
        let poses = [PosePick::draw(rng), PosePick::draw(rng)];
        Self { costumes, poses }
    }
}

impl std::fmt::Display for RewardBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rewards:")?;
        for c in &self.costumes {
            writeln!(f, "  Costume: {} #{}", c.category, c.item)?;
        }
        let [first, second] = &self.poses;
        writeln!(f, "  Pose: {} #{}", first.rarity, first.number)?;
        write!(f, "  Pose: {} #{}", second.rarity, second.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedSource, SeededSource};

    #[test]
    fn costume_items_within_category_range() {
        let mut rng = SeededSource::new(11);
        for _ in 0..500 {
            let pick = CostumePick::draw(&mut rng);
            assert!((1..=pick.category.item_count()).contains(&pick.item));
        }
    }

    #[test]
    fn pose_numbers_within_range() {
        let mut rng = SeededSource::new(12);
        for _ in 0..500 {
            let pick = PosePick::draw(&mut rng);
            assert!((1..=POSES_PER_RARITY).contains(&pick.number));
        }
    }

    #[test]
    fn every_category_is_reachable() {
        let mut rng = SeededSource::new(5);
        let mut seen = [false; 4];
        for _ in 0..400 {
            let pick = CostumePick::draw(&mut rng);
            let i = CostumeCategory::all()
                .iter()
                .position(|c| *c == pick.category)
                .unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn scripted_bundle() {
        // costume: Seasonal (25) #16 (99.9); Couture (80) #1 (0)
        // pose: Legendary (70) #4 (40); Rare (10) #8 (95)
        let mut rng =
            ScriptedSource::new(vec![25.0, 99.9, 80.0, 0.0, 70.0, 40.0, 10.0, 95.0]);
        let bundle = RewardBundle::generate(&mut rng);
        assert_eq!(rng.consumed(), 8);
        insta::assert_snapshot!(bundle.to_string(), @r"
        Rewards:
          Costume: Seasonal #16
          Costume: Couture #1
          Pose: Legendary #4
          Pose: Rare #8
        ");
    }
}
