use colored::Colorize;

use offering_core::calculate_bonus;

pub fn run(vip: &str, legendary: bool, epic: bool) -> Result<(), String> {
    let profile = super::profile_input("player", vip, legendary, epic)
        .validate()
        .map_err(|e| e.to_string())?;
    let bonus = calculate_bonus(&profile);

    println!("  {} VIP {}", "Bonus".bold(), profile.vip_level);
    println!("{}", super::format_bonus(&bonus));
    Ok(())
}
