use std::io::{self, BufRead, Write};
use std::sync::Arc;

use colored::Colorize;

use offering_core::{OutcomeType, ProfileInput};
use offering_session::{
    ApproverController, MemoryStore, PlayerController, RitualConfig, RitualMachine, RitualSession,
};

const HELP: &str = "\
Offering Table Commands:
  submit <name> <vip> <Y|N> <Y|N>  Player: enter profile (legendary, epic pledges)
  confirm                          Approver: confirm the player
  select <tier>                    Player: choose coward, tiny, high, full, absolute
  approve                          Approver: approve and draw the outcome
  reset [player|approver]          End the session (default: player)
  status                           Show the session and both views
  tiers                            Show tier odds for the current player
  help                             Show this help
  quit                             Leave";

/// Both roles sharing one in-process store.
pub struct Console {
    player: PlayerController,
    approver: ApproverController,
}

impl Console {
    pub fn new(config: RitualConfig) -> Result<Self, String> {
        let rng = Box::new(config.random_source());
        let machine = Arc::new(RitualMachine::new(Arc::new(MemoryStore::new()), config));
        let player = PlayerController::new(machine.clone()).map_err(|e| e.to_string())?;
        let approver = ApproverController::new(machine, rng).map_err(|e| e.to_string())?;
        Ok(Self { player, approver })
    }

    /// Handle one line of input and return the text to print.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();

        let output = match cmd.to_lowercase().as_str() {
            "submit" => self.do_submit(rest)?,
            "confirm" => {
                self.approver.confirm().map_err(|e| e.to_string())?;
                "Approver confirmed the player.".to_string()
            }
            "select" => {
                self.player.select_tier(rest).map_err(|e| e.to_string())?;
                format!("Player offered the {} tier.", rest.to_lowercase())
            }
            "approve" => {
                self.approver.approve().map_err(|e| e.to_string())?;
                self.result_text()
            }
            "reset" => self.do_reset(rest)?,
            "status" => return Ok(self.status_text()),
            "tiers" => return Ok(super::tiers::render(self.player_bonus()).to_string()),
            "help" => return Ok(HELP.to_string()),
            "quit" | "q" => return Ok("Farewell.".to_string()),
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };

        Ok(format!("{output}\n{}", self.views()))
    }

    fn do_submit(&mut self, rest: &str) -> Result<String, String> {
        let args: Vec<&str> = rest.split_whitespace().collect();
        if args.len() > 4 {
            return Err("usage: submit <name> <vip> <Y|N> <Y|N>".to_string());
        }
        let arg = |i: usize| args.get(i).copied().unwrap_or("");
        self.player
            .submit_profile(ProfileInput::new(arg(0), arg(1), arg(2), arg(3)))
            .map_err(|e| e.to_string())?;

        let mut out = format!("Player {} submitted a profile.", arg(0));
        if let Some(bonus) = self.player.bonus() {
            out.push('\n');
            out.push_str(&super::format_bonus(&bonus));
        }
        Ok(out)
    }

    fn do_reset(&mut self, rest: &str) -> Result<String, String> {
        let role = if rest.is_empty() { "player" } else { rest };
        let result = match role.to_lowercase().as_str() {
            "player" => self.player.reset(),
            "approver" => self.approver.reset(),
            other => return Err(format!("unknown role '{other}', expected player or approver")),
        };
        result.map_err(|e| e.to_string())?;
        Ok(format!("Session reset by the {role}."))
    }

    fn views(&mut self) -> String {
        format!(
            "  player: {} | approver: {}",
            self.player.sync(),
            self.approver.sync()
        )
    }

    fn player_bonus(&mut self) -> Option<i32> {
        self.player.sync();
        self.player.bonus().map(|b| b.total_bonus_pct)
    }

    fn result_text(&self) -> String {
        match self.approver.document().and_then(|d| d.result.as_ref()) {
            Some(result) => format!("{}!\n{}", result.outcome_type, result.message),
            None => "No result yet.".to_string(),
        }
    }

    fn status_text(&mut self) -> String {
        let views = self.views();
        match self.player.document() {
            Some(session) => format!("{}\n{views}", describe(session)),
            None => format!("No active session.\n{views}"),
        }
    }
}

fn describe(session: &RitualSession) -> String {
    let mut out = format!("Session {} ({})", session.id, session.status);
    if let Some(player) = &session.player {
        out.push_str(&format!(
            "\n  Player: {}, VIP {} (legendary: {}, epic: {})",
            player.name,
            player.vip_level,
            yes_no(player.will_burn_legendary),
            yes_no(player.will_burn_epic),
        ));
    }
    if let Some(bonus) = session.bonus() {
        out.push_str(&format!("\n  Bonus: +{}%", bonus.total_bonus_pct));
    }
    if let Some(tier) = session.tier() {
        out.push_str(&format!("\n  Sacrifice: {tier}"));
    }
    if let Some(result) = &session.result {
        out.push_str(&format!("\n  Outcome: {}", result.outcome_type));
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn highlight(output: &str) -> String {
    let mut lines = output.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    let first = match first.trim_end_matches('!') {
        s if s == OutcomeType::Success.to_string() => first.green().bold().to_string(),
        s if s == OutcomeType::Partial.to_string() => first.cyan().bold().to_string(),
        s if s == OutcomeType::Fail.to_string() => first.red().bold().to_string(),
        _ => first.to_string(),
    };
    std::iter::once(first)
        .chain(lines.map(str::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run(config: RitualConfig) -> Result<(), String> {
    let seed = config.seed;
    let mut console = Console::new(config)?;

    println!("  {} Offering Table", "Starting".bold());
    match seed {
        Some(seed) => println!("  Seed: {seed}"),
        None => println!("  Seed: random"),
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}\n", highlight(&output));
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}
