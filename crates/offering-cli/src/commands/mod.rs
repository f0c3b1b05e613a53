pub mod bonus;
pub mod play;
pub mod simulate;
pub mod tiers;

use offering_core::{BonusBreakdown, ProfileInput};
use offering_session::RitualConfig;

/// Build the session config from command-line flags.
pub fn config(seed: Option<u64>, conditional: bool) -> RitualConfig {
    let config = RitualConfig::default().with_conditional_writes(conditional);
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Turn boolean pledge flags into the Y/N answers the profile form expects.
pub fn profile_input(name: &str, vip: &str, legendary: bool, epic: bool) -> ProfileInput {
    ProfileInput::new(name, vip, yes_no(legendary), yes_no(epic))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Y" } else { "N" }
}

/// Render a bonus breakdown as indented lines.
pub fn format_bonus(bonus: &BonusBreakdown) -> String {
    let mut out = format!("  Total bonus: +{}%", bonus.total_bonus_pct);
    if bonus.explanations.is_empty() {
        out.push_str("\n    (no bonus)");
    }
    for line in &bonus.explanations {
        out.push_str(&format!("\n    {line}"));
    }
    out
}
