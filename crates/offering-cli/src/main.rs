//! CLI frontend for the Offering Table ritual.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "offering",
    about = "Offering Table: pledge photos, roll for costumes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log state transitions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sacrifice tiers and their odds
    Tiers {
        /// Player bonus (percentage points, 0-100) to apply to the odds
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(0..=100))]
        bonus: Option<i32>,
    },

    /// Show the bonus a player profile earns
    Bonus {
        /// VIP level (1-9)
        #[arg(long)]
        vip: String,

        /// Pledge at least 3 legendary photos
        #[arg(long)]
        legendary: bool,

        /// Pledge at least 4 epic photos
        #[arg(long)]
        epic: bool,
    },

    /// Play both roles against a shared session in one console
    Play {
        /// RNG seed for reproducible outcomes
        #[arg(short, long)]
        seed: Option<u64>,

        /// Use revision-checked writes instead of last-write-wins
        #[arg(long)]
        conditional: bool,
    },

    /// Run one full ritual with both roles as concurrent tasks
    Simulate {
        /// Player name (at most 10 characters)
        #[arg(short, long)]
        name: String,

        /// VIP level (1-9)
        #[arg(long)]
        vip: String,

        /// Pledge at least 3 legendary photos
        #[arg(long)]
        legendary: bool,

        /// Pledge at least 4 epic photos
        #[arg(long)]
        epic: bool,

        /// Sacrifice tier key (coward, tiny, high, full, absolute)
        #[arg(short, long)]
        tier: String,

        /// RNG seed for reproducible outcomes
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Tiers { bonus } => commands::tiers::run(bonus),
        Commands::Bonus {
            vip,
            legendary,
            epic,
        } => commands::bonus::run(&vip, legendary, epic),
        Commands::Play { seed, conditional } => {
            commands::play::run(commands::config(seed, conditional))
        }
        Commands::Simulate {
            name,
            vip,
            legendary,
            epic,
            tier,
            seed,
        } => commands::simulate::run(
            commands::profile_input(&name, &vip, legendary, epic),
            &tier,
            commands::config(seed, false),
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
