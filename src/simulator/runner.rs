//! Main simulation runner using SlotSession for real game mechanics.
//!
//! Each run is one player with a fixed bankroll and flat bet, spinning
//! until broke or out of spins. Statistics are gathered from the
//! SpinOutcome of every spin.

use super::config::SimConfig;
use super::report::SimReport;
use super::session_sim::RunStats;
use crate::notify::NullSink;
use crate::slots::session::{SlotSession, SpinOutcome};
use crate::slots::types::Symbol;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, &mut rng);

        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                of = config.num_runs,
                spins = run_stats.spins,
                final_balance = run_stats.final_balance,
                busted = run_stats.busted,
                rtp = run_stats.return_to_player(),
                "run finished"
            );
        }

        all_runs.push(run_stats);
    }

    SimReport::from_runs(all_runs, config)
}

/// Accumulates a RunStats from spin outcomes.
struct SimStats {
    stats: RunStats,
}

impl SimStats {
    fn new(starting_balance: u64) -> Self {
        Self {
            stats: RunStats {
                final_balance: starting_balance,
                peak_balance: starting_balance,
                ..Default::default()
            },
        }
    }

    fn process_spin(&mut self, outcome: &SpinOutcome) {
        let stats = &mut self.stats;
        stats.spins += 1;
        stats.total_wagered += outcome.bet;
        stats.total_won += outcome.win;
        stats.final_balance = outcome.balance_after;
        stats.peak_balance = stats.peak_balance.max(outcome.balance_after);
        stats.biggest_win = stats.biggest_win.max(outcome.win);

        if outcome.win > 0 {
            stats.wins += 1;
        }

        let triple = outcome.result.triple_symbol();
        if triple.is_some() {
            stats.triples += 1;
        }
        if triple == Some(Symbol::JACKPOT) {
            stats.jackpots += 1;
        }

        if outcome.rescue_armed {
            stats.rescue_armed_spins += 1;
            if triple.is_some() {
                stats.rescue_triples += 1;
            }
        }
    }

    fn finish(mut self, session: &SlotSession) -> RunStats {
        self.stats.busted = !session.can_spin();
        self.stats.longest_loss_streak = session.longest_loss_streak();
        self.stats
    }
}

/// Simulate one session from first spin to walk-away.
fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let mut session = SlotSession::new(config.slot_config());
    let mut stats = SimStats::new(session.balance());

    for _ in 0..config.max_spins_per_run {
        match session.spin(rng, &mut NullSink) {
            Ok(outcome) => stats.process_spin(&outcome),
            Err(_) => break,
        }
    }

    stats.finish(&session)
}
