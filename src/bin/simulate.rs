//! Slot session simulator CLI.
//!
//! Run Monte Carlo simulations of many players against the machine.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 1000 sessions, honest machine
//!   cargo run --bin simulate -- -n 100 --rigged    # 100 sessions with rescue wins
//!   cargo run --bin simulate -- --seed 42 --json   # Reproducible, with JSON report

use anyhow::{Context, Result};
use clap::Parser;
use houseedge::simulator::{run_simulation, SimConfig};
use houseedge::slots::PaytableVariant;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Monte Carlo simulation of slot sessions")]
struct Args {
    /// Number of simulated sessions
    #[arg(short = 'n', long)]
    runs: Option<u32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum spins per session
    #[arg(short = 't', long)]
    spins: Option<u32>,

    /// Flat bet per spin
    #[arg(short, long)]
    bet: Option<u64>,

    /// Starting bankroll
    #[arg(long)]
    balance: Option<u64>,

    /// Paytable variant (classic or near-miss)
    #[arg(short, long)]
    paytable: Option<PaytableVariant>,

    /// Enable rescue wins after losing streaks
    #[arg(long)]
    rigged: bool,

    /// Small batch for a fast comparison
    #[arg(long, conflicts_with = "whale")]
    quick: bool,

    /// Deep bankroll to measure the long-run edge
    #[arg(long)]
    whale: bool,

    /// Also write the report as JSON
    #[arg(long)]
    json: bool,

    /// Log every run
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> SimConfig {
        let mut config = if self.quick {
            SimConfig::quick(self.rigged)
        } else if self.whale {
            SimConfig::whale()
        } else {
            SimConfig::default()
        };

        if let Some(runs) = self.runs {
            config.num_runs = runs;
        }
        if let Some(spins) = self.spins {
            config.max_spins_per_run = spins;
        }
        if let Some(bet) = self.bet {
            config.bet = bet;
        }
        if let Some(balance) = self.balance {
            config.starting_balance = balance;
        }
        if let Some(paytable) = self.paytable {
            config.paytable = paytable;
        }
        config.seed = self.seed;
        config.rescue_wins |= self.rigged;
        if self.verbose {
            config.verbosity = 2;
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let json = args.json;
    let level = if args.verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = args.into_config();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              HOUSE EDGE SESSION SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Spins:      {}", config.max_spins_per_run);
    println!("  Bankroll:       {}", config.starting_balance);
    println!("  Bet:            {}", config.bet);
    println!("  Paytable:       {}", config.paytable.name());
    if config.rescue_wins {
        println!("  Rescue Wins:    enabled");
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write JSON report to {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}
