//! Reel outcome sampling.
//!
//! Each reel is an independent weighted draw. Two post-processes bend the
//! result away from fair play:
//! - jackpot suppression rewrites a third Seven most of the time,
//! - after a long losing streak a rescue triple is usually forced.

use super::types::{LossStreak, SpinResult, Symbol};
use crate::core::constants::{
    JACKPOT_SUPPRESSION_CHANCE, RESCUE_STREAK_THRESHOLD, RESCUE_TRIPLE_WEIGHTS,
    RESCUE_WIN_CHANCE, SYMBOL_WEIGHTS,
};
use rand::Rng;

/// Total of all symbol weights.
pub fn total_weight() -> u32 {
    SYMBOL_WEIGHTS.iter().sum()
}

/// Draws one reel symbol from the weighted table.
///
/// The roll is uniform over `0..total`; the first symbol (in index order)
/// whose cumulative weight exceeds the roll wins.
pub fn draw_symbol(rng: &mut impl Rng) -> Symbol {
    let roll = rng.gen_range(0..total_weight());

    let mut cumulative = 0;
    for symbol in Symbol::ALL {
        cumulative += symbol.weight();
        if roll < cumulative {
            return symbol;
        }
    }

    Symbol::Cherry
}

/// Spins all three reels.
///
/// When the first two reels both show the jackpot symbol, a third jackpot is
/// replaced by the lowest-index symbol 95% of the time.
pub fn sample(rng: &mut impl Rng) -> SpinResult {
    let mut reels = [draw_symbol(rng), draw_symbol(rng), draw_symbol(rng)];

    if reels[0] == Symbol::JACKPOT
        && reels[1] == Symbol::JACKPOT
        && rng.gen_bool(JACKPOT_SUPPRESSION_CHANCE)
        && reels[2] == Symbol::JACKPOT
    {
        reels[2] = Symbol::ALL[0];
    }

    SpinResult::new(reels)
}

/// Spins with the rescue-win manipulation applied.
///
/// At or above the streak threshold, 80% of spins return a forced triple
/// drawn from the rescue table; everything else is a plain [`sample`].
pub fn sample_with_streak(loss_streak: LossStreak, rng: &mut impl Rng) -> SpinResult {
    if loss_streak.count() >= RESCUE_STREAK_THRESHOLD && rng.gen_bool(RESCUE_WIN_CHANCE) {
        let symbol = draw_rescue_symbol(rng);
        tracing::debug!(
            streak = loss_streak.count(),
            symbol = symbol.name(),
            "forcing rescue win"
        );
        return SpinResult::triple(symbol);
    }

    sample(rng)
}

/// Whether a streak is long enough to arm the rescue branch.
pub fn rescue_armed(loss_streak: LossStreak) -> bool {
    loss_streak.count() >= RESCUE_STREAK_THRESHOLD
}

fn draw_rescue_symbol(rng: &mut impl Rng) -> Symbol {
    let total: u32 = RESCUE_TRIPLE_WEIGHTS.iter().map(|(_, w)| w).sum();
    let roll = rng.gen_range(0..total);

    let mut cumulative = 0;
    for (index, weight) in RESCUE_TRIPLE_WEIGHTS {
        cumulative += weight;
        if roll < cumulative {
            return Symbol::ALL[index];
        }
    }

    Symbol::Cherry
}
