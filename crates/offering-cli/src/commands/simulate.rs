use std::sync::Arc;

use colored::Colorize;

use offering_core::{ProfileInput, TierKey};
use offering_session::{
    ApproverController, ApproverStep, MemoryStore, PlayerController, PlayerStep, RitualConfig,
    RitualMachine, RitualSession,
};

pub fn run(input: ProfileInput, tier: &str, config: RitualConfig) -> Result<(), String> {
    // Reject bad input before any task starts waiting on the store.
    input.validate().map_err(|e| e.to_string())?;
    let tier = TierKey::parse(tier).map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let session = runtime.block_on(simulate(input, tier, config))?;
    print_result(&session);
    Ok(())
}

async fn simulate(
    input: ProfileInput,
    tier: TierKey,
    config: RitualConfig,
) -> Result<RitualSession, String> {
    let rng = Box::new(config.random_source());
    let machine = Arc::new(RitualMachine::new(Arc::new(MemoryStore::new()), config));
    let mut player = PlayerController::new(machine.clone()).map_err(|e| e.to_string())?;
    let approver = ApproverController::new(machine, rng).map_err(|e| e.to_string())?;

    let approver_task = tokio::spawn(approver_role(approver));

    let played = player_role(&mut player, input, tier).await;
    if played.is_err() {
        approver_task.abort();
    }
    let session = played?;

    let approved = approver_task
        .await
        .map_err(|e| format!("approver task failed: {e}"))??;
    if approved != session {
        return Err("player and approver saw different results".to_string());
    }
    Ok(session)
}

async fn player_role(
    player: &mut PlayerController,
    input: ProfileInput,
    tier: TierKey,
) -> Result<RitualSession, String> {
    println!("  {} submits {} (VIP {})", "player".cyan(), input.name, input.vip);
    player.submit_profile(input).map_err(|e| e.to_string())?;

    while let Some(step) = player.changed().await {
        match step {
            PlayerStep::ChooseSacrifice => {
                println!("  {} offers the {tier} tier", "player".cyan());
                player
                    .select_tier(tier.as_str())
                    .map_err(|e| e.to_string())?;
            }
            PlayerStep::ShowResult => {
                return player
                    .document()
                    .cloned()
                    .ok_or_else(|| "session vanished before the result".to_string());
            }
            PlayerStep::EnterProfile => return Err("session was reset".to_string()),
            _ => {}
        }
    }
    Err("session store closed".to_string())
}

async fn approver_role(mut approver: ApproverController) -> Result<RitualSession, String> {
    while let Some(step) = approver.changed().await {
        match step {
            ApproverStep::ReviewPlayer => {
                if let Some(bonus) = approver.bonus() {
                    println!(
                        "  {} confirms the player (+{}%)",
                        "approver".magenta(),
                        bonus.total_bonus_pct
                    );
                }
                approver.confirm().map_err(|e| e.to_string())?;
            }
            ApproverStep::ReviewSacrifice => {
                println!("  {} approves the sacrifice", "approver".magenta());
                approver.approve().map_err(|e| e.to_string())?;
                return approver
                    .document()
                    .cloned()
                    .ok_or_else(|| "session vanished after approval".to_string());
            }
            _ => {}
        }
    }
    Err("session store closed".to_string())
}

fn print_result(session: &RitualSession) {
    println!();
    if let Some(tier) = session.tier() {
        println!("  {} {tier}", "Sacrifice:".bold());
    }
    if let Some(result) = &session.result {
        println!("  {} {}", "Outcome:".bold(), result.outcome_type);
        for line in result.message.lines() {
            println!("  {line}");
        }
    }
}
