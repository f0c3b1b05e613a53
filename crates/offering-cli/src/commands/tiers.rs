use comfy_table::{ContentArrangement, Table};

use offering_core::{BonusRule, CATALOG, Odds, adjusted_odds};

pub fn run(bonus: Option<i32>) -> Result<(), String> {
    println!("{}", render(bonus));
    if let Some(bonus) = bonus {
        println!();
        println!("  Odds shown with a +{bonus}% player bonus.");
    }
    Ok(())
}

/// The tier catalog as a table, with adjusted odds when a bonus is given.
pub fn render(bonus: Option<i32>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["", "Key", "Tier", "Burn", "Base S/P/F"];
    if bonus.is_some() {
        header.push("Adjusted S/P/F");
    }
    header.push("Bonus rule");
    table.set_header(header);

    for tier in &CATALOG {
        let mut row = vec![
            tier.icon.to_string(),
            tier.key.to_string(),
            tier.display_name.to_string(),
            tier.photos_burned.to_string(),
            Odds::base(tier).to_string(),
        ];
        if let Some(bonus) = bonus {
            row.push(adjusted_odds(tier, bonus).to_string());
        }
        row.push(rule_label(tier.bonus_rule()).to_string());
        table.add_row(row);
    }

    table
}

fn rule_label(rule: BonusRule) -> &'static str {
    match rule {
        BonusRule::Standard => "standard",
        BonusRule::FailFloor => "fail floored at 1",
        BonusRule::Immune => "immune",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_tier() {
        let text = render(None).to_string();
        for key in ["coward", "tiny", "high", "full", "absolute"] {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(!text.contains("Adjusted"));
    }

    #[test]
    fn bonus_adds_adjusted_column() {
        let text = render(Some(10)).to_string();
        assert!(text.contains("Adjusted S/P/F"));
        assert!(text.contains("60/35/5"));
        assert!(text.contains("95/4/1"));
    }
}
