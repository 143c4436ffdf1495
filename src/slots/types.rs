//! Slot machine data types: symbols, spin results, and history records.

use crate::core::constants::{REEL_COUNT, SYMBOL_COUNT, SYMBOL_WEIGHTS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the eight reel symbols. Discriminants are the stable indices 0-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Cherry = 0,
    Lemon = 1,
    Orange = 2,
    Grape = 3,
    Bell = 4,
    Diamond = 5,
    Seven = 6,
    Star = 7,
}

impl Symbol {
    /// All symbols in index order.
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Grape,
        Symbol::Bell,
        Symbol::Diamond,
        Symbol::Seven,
        Symbol::Star,
    ];

    /// The jackpot symbol.
    pub const JACKPOT: Symbol = Symbol::Seven;

    /// Look up a symbol by its stable index.
    pub fn from_index(index: usize) -> Option<Symbol> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Relative sampling weight (out of the total in `SYMBOL_WEIGHTS`).
    pub fn weight(self) -> u32 {
        SYMBOL_WEIGHTS[self.index()]
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Orange => "🍊",
            Symbol::Grape => "🍇",
            Symbol::Bell => "🔔",
            Symbol::Diamond => "💎",
            Symbol::Seven => "7️⃣",
            Symbol::Star => "⭐",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Cherry => "Cherry",
            Symbol::Lemon => "Lemon",
            Symbol::Orange => "Orange",
            Symbol::Grape => "Grape",
            Symbol::Bell => "Bell",
            Symbol::Diamond => "Diamond",
            Symbol::Seven => "Seven",
            Symbol::Star => "Star",
        }
    }
}

/// The three symbols shown after a spin, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinResult(pub [Symbol; REEL_COUNT]);

impl SpinResult {
    pub fn new(reels: [Symbol; REEL_COUNT]) -> Self {
        Self(reels)
    }

    /// Build a result from raw symbol indices. Returns `None` if any index is out of range.
    pub fn from_indices(indices: [usize; REEL_COUNT]) -> Option<Self> {
        Some(Self([
            Symbol::from_index(indices[0])?,
            Symbol::from_index(indices[1])?,
            Symbol::from_index(indices[2])?,
        ]))
    }

    /// A result with the same symbol on every reel.
    pub fn triple(symbol: Symbol) -> Self {
        Self([symbol; REEL_COUNT])
    }

    pub fn reels(&self) -> &[Symbol; REEL_COUNT] {
        &self.0
    }

    pub fn indices(&self) -> [usize; REEL_COUNT] {
        [self.0[0].index(), self.0[1].index(), self.0[2].index()]
    }

    /// The symbol on all three reels, if they match.
    pub fn triple_symbol(&self) -> Option<Symbol> {
        let [a, b, c] = self.0;
        (a == b && b == c).then_some(a)
    }

    /// The symbol shown on exactly two reels, if any.
    pub fn pair_symbol(&self) -> Option<Symbol> {
        let [a, b, c] = self.0;
        if a == b && b == c {
            None
        } else if a == b || a == c {
            Some(a)
        } else if b == c {
            Some(b)
        } else {
            None
        }
    }

    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(|s| s.glyph())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One entry in a session's spin history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameHistoryRecord {
    /// Sequential within a session, starting at 1.
    pub id: u64,
    pub bet: u64,
    pub result: SpinResult,
    pub win: u64,
    pub timestamp: DateTime<Utc>,
}

impl GameHistoryRecord {
    /// Win minus bet for this spin.
    pub fn net(&self) -> i64 {
        self.win as i64 - self.bet as i64
    }

    pub fn is_win(&self) -> bool {
        self.win > 0
    }
}

/// Consecutive zero-payout spins since the last win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LossStreak(pub u32);

impl LossStreak {
    /// Build from a signed counter; negative values count as no streak.
    pub fn from_signed(value: i64) -> Self {
        Self(value.clamp(0, u32::MAX as i64) as u32)
    }

    pub fn count(self) -> u32 {
        self.0
    }

    /// Advance after a spin: reset on any win, otherwise count one more loss.
    pub fn record(&mut self, win: u64) {
        if win > 0 {
            self.0 = 0;
        } else {
            self.0 = self.0.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_indices_are_stable() {
        for (i, symbol) in Symbol::ALL.iter().enumerate() {
            assert_eq!(symbol.index(), i);
            assert_eq!(Symbol::from_index(i), Some(*symbol));
        }
        assert_eq!(Symbol::from_index(8), None);
        assert_eq!(Symbol::JACKPOT.index(), 6);
    }

    #[test]
    fn test_weights_sum_to_one_hundred() {
        let total: u32 = Symbol::ALL.iter().map(|s| s.weight()).sum();
        assert_eq!(total, 100);
        assert_eq!(Symbol::Seven.weight(), 2);
    }

    #[test]
    fn test_triple_and_pair_detection() {
        let triple = SpinResult::triple(Symbol::Bell);
        assert_eq!(triple.triple_symbol(), Some(Symbol::Bell));
        assert_eq!(triple.pair_symbol(), None);

        let split = SpinResult::from_indices([3, 0, 3]).unwrap();
        assert_eq!(split.triple_symbol(), None);
        assert_eq!(split.pair_symbol(), Some(Symbol::Grape));

        let tail = SpinResult::from_indices([1, 5, 5]).unwrap();
        assert_eq!(tail.pair_symbol(), Some(Symbol::Diamond));

        let none = SpinResult::from_indices([0, 1, 2]).unwrap();
        assert_eq!(none.triple_symbol(), None);
        assert_eq!(none.pair_symbol(), None);
    }

    #[test]
    fn test_from_indices_rejects_out_of_range() {
        assert!(SpinResult::from_indices([0, 9, 1]).is_none());
    }

    #[test]
    fn test_loss_streak_record_and_clamp() {
        let mut streak = LossStreak::default();
        streak.record(0);
        streak.record(0);
        assert_eq!(streak.count(), 2);
        streak.record(500);
        assert_eq!(streak.count(), 0);

        assert_eq!(LossStreak::from_signed(-4), LossStreak(0));
        assert_eq!(LossStreak::from_signed(12), LossStreak(12));
    }

    #[test]
    fn test_history_record_survives_json() {
        let record = GameHistoryRecord {
            id: 3,
            bet: 10_000,
            result: SpinResult::from_indices([6, 6, 1]).unwrap(),
            win: 5_000,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let loaded: GameHistoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.net(), -5_000);
    }
}
