//! Motivational lines shown with each ritual outcome.

use crate::random::RandomSource;
use crate::resolver::OutcomeType;

const SUCCESS_LINES: &[&str] = &[
    "The ritual was a wild success! You claimed your dream reward. 🥂",
    "Night Bunny bows to your will! Power is yours tonight.",
    "A flawless ascension. Bask in your glory, chosen one!",
];

const PARTIAL_LINES: &[&str] = &[
    "Not quite perfect, but you earned two rewards. Fate's a tease!",
    "Partial success! Night Bunny admires your courage.",
    "Halfway to greatness. Keep risking, keep rising.",
];

const FAIL_LINES: &[&str] = &[
    "The ritual fizzled... Try again, luck may smile next time.",
    "Night Bunny sighs at a failed sacrifice. Destiny's cruel!",
    "No reward this time. Sometimes the night bites back.",
];

/// The line pool for an outcome.
pub fn lines(outcome: OutcomeType) -> &'static [&'static str] {
    match outcome {
        OutcomeType::Success => SUCCESS_LINES,
        OutcomeType::Partial => PARTIAL_LINES,
        OutcomeType::Fail => FAIL_LINES,
    }
}

/// Pick one line for an outcome uniformly.
pub fn pick(outcome: OutcomeType, rng: &mut dyn RandomSource) -> &'static str {
    let pool = lines(outcome);
    pool[rng.pick_index(pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn every_outcome_has_lines() {
        for outcome in [OutcomeType::Success, OutcomeType::Partial, OutcomeType::Fail] {
            assert!(!lines(outcome).is_empty());
        }
    }

    #[test]
    fn pick_uses_rng() {
        let mut rng = ScriptedSource::new(vec![0.0, 99.0]);
        assert_eq!(pick(OutcomeType::Fail, &mut rng), FAIL_LINES[0]);
        assert_eq!(pick(OutcomeType::Fail, &mut rng), FAIL_LINES[2]);
    }
}
