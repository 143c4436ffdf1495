//! Simulation configuration.

use crate::core::constants::{DEFAULT_BET, STARTING_BALANCE};
use crate::slots::paytable::PaytableVariant;
use crate::slots::session::SlotConfig;

/// Configuration for a batch of simulated slot sessions.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum spins per session before the player walks away
    pub max_spins_per_run: u32,

    /// Bankroll each session starts with
    pub starting_balance: u64,

    /// Flat bet used for every spin
    pub bet: u64,

    pub paytable: PaytableVariant,

    /// Apply the rescue-win manipulation after losing streaks
    pub rescue_wins: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_spins_per_run: 10_000,
            starting_balance: STARTING_BALANCE,
            bet: DEFAULT_BET,
            paytable: PaytableVariant::default(),
            rescue_wins: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for comparing honest and rigged machines
    pub fn quick(rescue_wins: bool) -> Self {
        Self {
            num_runs: 100,
            max_spins_per_run: 1_000,
            rescue_wins,
            ..Default::default()
        }
    }

    /// A deep-pocketed player, to measure the long-run edge
    pub fn whale() -> Self {
        Self {
            num_runs: 50,
            starting_balance: 100_000_000,
            max_spins_per_run: 50_000,
            ..Default::default()
        }
    }

    /// Session settings for one simulated player.
    pub fn slot_config(&self) -> SlotConfig {
        SlotConfig {
            paytable: self.paytable,
            starting_balance: self.starting_balance,
            starting_bet: self.bet,
            rescue_wins: self.rescue_wins,
            ..Default::default()
        }
    }
}
