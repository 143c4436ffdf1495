//! Paytables and payout evaluation.
//!
//! Two paytable variants exist; they are selected, never blended. The
//! crate-wide default is [`DEFAULT_PAYTABLE`].

use super::types::{SpinResult, Symbol};
use crate::core::constants::{
    NEAR_MISS_LOW_PAIR_PERMILLE, PAIR_PAYOUT_PERMILLE, SYMBOL_COUNT, SYMBOL_WEIGHTS,
};
use serde::{Deserialize, Serialize};

/// Paytable used by [`evaluate`].
pub const DEFAULT_PAYTABLE: PaytableVariant = PaytableVariant::Classic;

/// Selectable paytable variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaytableVariant {
    /// High three-of-a-kind multipliers, any pair pays half the bet.
    #[default]
    Classic,
    /// Flatter multipliers; a pair of high symbols pays half the bet, other
    /// pairs a tenth.
    NearMiss,
}

impl PaytableVariant {
    pub const ALL: [PaytableVariant; 2] = [PaytableVariant::Classic, PaytableVariant::NearMiss];

    pub fn paytable(self) -> Paytable {
        match self {
            PaytableVariant::Classic => Paytable::CLASSIC,
            PaytableVariant::NearMiss => Paytable::NEAR_MISS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaytableVariant::Classic => "classic",
            PaytableVariant::NearMiss => "near-miss",
        }
    }
}

impl std::str::FromStr for PaytableVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaytableVariant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown paytable '{}' (expected classic or near-miss)", s))
    }
}

/// How two matching symbols pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRule {
    /// Every pair pays the same fraction of the bet.
    Flat { permille: u64 },
    /// Pairs of `high` symbols pay `high_permille`, all others `low_permille`.
    Graduated {
        high: &'static [Symbol],
        high_permille: u64,
        low_permille: u64,
    },
}

impl PairRule {
    fn permille_for(&self, symbol: Symbol) -> u64 {
        match *self {
            PairRule::Flat { permille } => permille,
            PairRule::Graduated {
                high,
                high_permille,
                low_permille,
            } => {
                if high.contains(&symbol) {
                    high_permille
                } else {
                    low_permille
                }
            }
        }
    }
}

/// Fixed mapping from matching outcomes to payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paytable {
    /// Three-of-a-kind multiplier, indexed by symbol.
    pub triple_multipliers: [u64; SYMBOL_COUNT],
    pub pair_rule: PairRule,
}

impl Paytable {
    //                                  Che Lem Ora Gra Bel Dia  Sev  Sta
    pub const CLASSIC: Paytable = Paytable {
        triple_multipliers: [2, 3, 5, 10, 25, 50, 100, 30],
        pair_rule: PairRule::Flat {
            permille: PAIR_PAYOUT_PERMILLE,
        },
    };

    pub const NEAR_MISS: Paytable = Paytable {
        triple_multipliers: [2, 3, 4, 5, 10, 20, 50, 15],
        pair_rule: PairRule::Graduated {
            high: &[Symbol::Seven, Symbol::Diamond],
            high_permille: PAIR_PAYOUT_PERMILLE,
            low_permille: NEAR_MISS_LOW_PAIR_PERMILLE,
        },
    };

    pub fn multiplier(&self, symbol: Symbol) -> u64 {
        self.triple_multipliers[symbol.index()]
    }

    /// Payout for a pair of `symbol` at the given bet, floored.
    pub fn pair_payout(&self, symbol: Symbol, bet: u64) -> u64 {
        bet.saturating_mul(self.pair_rule.permille_for(symbol)) / 1000
    }

    /// Win amount for `result` at `bet`. A zero bet always pays zero.
    pub fn evaluate(&self, result: &SpinResult, bet: u64) -> u64 {
        if bet == 0 {
            return 0;
        }

        if let Some(symbol) = result.triple_symbol() {
            return bet.saturating_mul(self.multiplier(symbol));
        }

        match result.pair_symbol() {
            Some(symbol) => self.pair_payout(symbol, bet),
            None => 0,
        }
    }

    /// True when no symbol pays less than a more common one.
    pub fn is_monotonic_with_weights(&self) -> bool {
        Symbol::ALL.iter().all(|a| {
            Symbol::ALL.iter().all(|b| {
                SYMBOL_WEIGHTS[a.index()] >= SYMBOL_WEIGHTS[b.index()]
                    || self.multiplier(*a) >= self.multiplier(*b)
            })
        })
    }
}

/// Win amount under the default paytable.
pub fn evaluate(result: &SpinResult, bet: u64) -> u64 {
    DEFAULT_PAYTABLE.paytable().evaluate(result, bet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(indices: [usize; 3]) -> SpinResult {
        SpinResult::from_indices(indices).unwrap()
    }

    #[test]
    fn test_variant_parses_from_name() {
        assert_eq!("classic".parse(), Ok(PaytableVariant::Classic));
        assert_eq!("Near-Miss".parse(), Ok(PaytableVariant::NearMiss));
        assert!("progressive".parse::<PaytableVariant>().is_err());
    }

    #[test]
    fn test_jackpot_triple_pays_hundredfold() {
        assert_eq!(evaluate(&spin([6, 6, 6]), 10_000), 1_000_000);
    }

    #[test]
    fn test_two_match_pays_half() {
        assert_eq!(evaluate(&spin([0, 0, 3]), 10_000), 5_000);
        assert_eq!(evaluate(&spin([3, 0, 0]), 10_000), 5_000);
        assert_eq!(evaluate(&spin([0, 3, 0]), 10_000), 5_000);
    }

    #[test]
    fn test_no_match_pays_nothing() {
        assert_eq!(evaluate(&spin([0, 1, 2]), 10_000), 0);
    }

    #[test]
    fn test_pair_payout_floors_odd_bets() {
        assert_eq!(evaluate(&spin([4, 4, 1]), 1_001), 500);
    }

    #[test]
    fn test_zero_bet_pays_nothing() {
        assert_eq!(evaluate(&spin([6, 6, 6]), 0), 0);
        assert_eq!(evaluate(&spin([2, 2, 1]), 0), 0);
    }

    #[test]
    fn test_both_tables_are_monotonic() {
        for variant in PaytableVariant::ALL {
            assert!(
                variant.paytable().is_monotonic_with_weights(),
                "{} paytable should pay rarer symbols at least as much",
                variant.name()
            );
        }
    }

    #[test]
    fn test_near_miss_graduated_pairs() {
        let table = PaytableVariant::NearMiss.paytable();
        assert_eq!(table.evaluate(&spin([6, 6, 0]), 10_000), 5_000);
        assert_eq!(table.evaluate(&spin([5, 1, 5]), 10_000), 5_000);
        assert_eq!(table.evaluate(&spin([0, 0, 1]), 10_000), 1_000);
        assert_eq!(table.evaluate(&spin([6, 6, 6]), 10_000), 500_000);
    }

    #[test]
    fn test_default_variant_is_classic() {
        assert_eq!(DEFAULT_PAYTABLE, PaytableVariant::Classic);
        assert_eq!(PaytableVariant::default(), PaytableVariant::Classic);
    }
}
