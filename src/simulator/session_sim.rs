//! Per-session statistics.

use serde::Serialize;

/// How a single simulated session went.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub spins: u32,
    pub total_wagered: u64,
    pub total_won: u64,
    pub final_balance: u64,
    pub peak_balance: u64,
    /// Ran out of money before the spin limit.
    pub busted: bool,
    pub wins: u32,
    pub triples: u32,
    pub jackpots: u32,
    /// Spins taken while the rescue branch was armed.
    pub rescue_armed_spins: u32,
    /// Armed spins that came out as a triple.
    pub rescue_triples: u32,
    pub longest_loss_streak: u32,
    pub biggest_win: u64,
}

impl RunStats {
    /// Fraction of wagers paid back.
    pub fn return_to_player(&self) -> f64 {
        if self.total_wagered == 0 {
            return 0.0;
        }
        self.total_won as f64 / self.total_wagered as f64
    }

    pub fn win_rate(&self) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        self.wins as f64 / self.spins as f64
    }

    /// Final balance minus starting balance.
    pub fn net(&self, starting_balance: u64) -> i64 {
        self.final_balance as i64 - starting_balance as i64
    }
}
