//! House edge: Monte Carlo estimate and exact expectation.

use crate::core::constants::JACKPOT_SUPPRESSION_CHANCE;
use crate::slots::paytable::Paytable;
use crate::slots::sampler::{sample, total_weight};
use crate::slots::types::{SpinResult, Symbol};
use rand::Rng;
use serde::Serialize;

/// Result of a Monte Carlo house-edge run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseEdgeEstimate {
    pub spins: u32,
    pub bet: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub triples: u32,
    pub pairs: u32,
    pub jackpots: u32,
}

impl HouseEdgeEstimate {
    /// Fraction of wagers returned to the player.
    pub fn return_to_player(&self) -> f64 {
        if self.total_bet == 0 {
            return 0.0;
        }
        self.total_win as f64 / self.total_bet as f64
    }

    /// Percent of wagers kept by the house.
    pub fn house_edge_percent(&self) -> f64 {
        if self.total_bet == 0 {
            return 0.0;
        }
        (self.total_bet as f64 - self.total_win as f64) / self.total_bet as f64 * 100.0
    }
}

/// Spin `spins` times at `bet` and tally the results.
pub fn estimate_house_edge(
    paytable: &Paytable,
    spins: u32,
    bet: u64,
    rng: &mut impl Rng,
) -> HouseEdgeEstimate {
    let mut estimate = HouseEdgeEstimate {
        spins,
        bet,
        total_bet: 0,
        total_win: 0,
        triples: 0,
        pairs: 0,
        jackpots: 0,
    };

    for _ in 0..spins {
        let result = sample(rng);
        estimate.total_bet += bet;
        estimate.total_win += paytable.evaluate(&result, bet);

        match result.triple_symbol() {
            Some(Symbol::Seven) => {
                estimate.triples += 1;
                estimate.jackpots += 1;
            }
            Some(_) => estimate.triples += 1,
            None if result.pair_symbol().is_some() => estimate.pairs += 1,
            None => {}
        }
    }

    estimate
}

/// Every possible spin with its probability under [`sample`], jackpot
/// suppression included.
pub fn outcome_distribution() -> Vec<(SpinResult, f64)> {
    let total = total_weight() as f64;
    let mut outcomes = Vec::with_capacity(Symbol::ALL.len().pow(3));

    for a in Symbol::ALL {
        for b in Symbol::ALL {
            for c in Symbol::ALL {
                let p = a.weight() as f64 / total * b.weight() as f64 / total * c.weight() as f64
                    / total;
                let result = SpinResult::new([a, b, c]);
                if result.triple_symbol() == Some(Symbol::JACKPOT) {
                    let rewritten = SpinResult::new([a, b, Symbol::ALL[0]]);
                    outcomes.push((rewritten, p * JACKPOT_SUPPRESSION_CHANCE));
                    outcomes.push((result, p * (1.0 - JACKPOT_SUPPRESSION_CHANCE)));
                } else {
                    outcomes.push((result, p));
                }
            }
        }
    }

    outcomes
}

/// Exact expected payout per unit wagered at `bet`, floor rounding included.
pub fn exact_return_to_player(paytable: &Paytable, bet: u64) -> f64 {
    if bet == 0 {
        return 0.0;
    }
    outcome_distribution()
        .iter()
        .map(|(result, p)| p * paytable.evaluate(result, bet) as f64)
        .sum::<f64>()
        / bet as f64
}

/// Exact house edge in percent.
pub fn exact_house_edge_percent(paytable: &Paytable, bet: u64) -> f64 {
    (1.0 - exact_return_to_player(paytable, bet)) * 100.0
}

/// Probability that [`sample`] shows three jackpot symbols.
pub fn jackpot_probability() -> f64 {
    let p = Symbol::JACKPOT.weight() as f64 / total_weight() as f64;
    p.powi(3) * (1.0 - JACKPOT_SUPPRESSION_CHANCE)
}
