//! A player's slot session: balance, bet, streak and spin history.
//!
//! The sampler and evaluator are pure; this is the caller that applies
//! their results to money and keeps the bookkeeping.

use super::paytable::PaytableVariant;
use super::sampler::{rescue_armed, sample, sample_with_streak};
use super::types::{GameHistoryRecord, LossStreak, SpinResult};
use crate::core::constants::{
    BET_STEP, DEFAULT_BET, MAX_BET, MAX_TOPUP, MIN_BET, STARTING_BALANCE,
};
use crate::notify::{GameEvent, NotificationSink};
use chrono::Utc;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

/// Session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotConfig {
    pub paytable: PaytableVariant,
    pub starting_balance: u64,
    pub starting_bet: u64,
    pub min_bet: u64,
    pub max_bet: u64,
    pub bet_step: u64,
    pub max_topup: u64,
    /// Force rescue wins after long losing streaks.
    pub rescue_wins: bool,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            paytable: PaytableVariant::default(),
            starting_balance: STARTING_BALANCE,
            starting_bet: DEFAULT_BET,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            bet_step: BET_STEP,
            max_topup: MAX_TOPUP,
            rescue_wins: false,
        }
    }
}

impl SlotConfig {
    /// Config with the streak manipulation switched on.
    pub fn rigged() -> Self {
        Self {
            rescue_wins: true,
            ..Default::default()
        }
    }
}

/// Why a session operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("balance {balance} is below the bet of {bet}")]
    InsufficientBalance { balance: u64, bet: u64 },
    #[error("top-up must be between 1 and {max} (got {amount})")]
    InvalidTopup { amount: u64, max: u64 },
    #[error("withdrawal must be between 1 and the balance {balance} (got {amount})")]
    InvalidWithdrawal { amount: u64, balance: u64 },
}

/// What a single spin produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub result: SpinResult,
    pub bet: u64,
    pub win: u64,
    pub balance_after: u64,
    /// The rescue branch was armed for this spin.
    pub rescue_armed: bool,
}

/// In-memory slot session. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SlotSession {
    config: SlotConfig,
    balance: u64,
    bet: u64,
    loss_streak: LossStreak,
    longest_loss_streak: u32,
    /// Newest first.
    history: VecDeque<GameHistoryRecord>,
    next_id: u64,
    total_topped_up: u64,
    total_withdrawn: u64,
}

impl SlotSession {
    pub fn new(config: SlotConfig) -> Self {
        let bet = config.starting_bet.clamp(config.min_bet, config.max_bet);
        Self {
            balance: config.starting_balance,
            bet,
            loss_streak: LossStreak::default(),
            longest_loss_streak: 0,
            history: VecDeque::new(),
            next_id: 1,
            total_topped_up: 0,
            total_withdrawn: 0,
            config,
        }
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn loss_streak(&self) -> LossStreak {
        self.loss_streak
    }

    pub fn longest_loss_streak(&self) -> u32 {
        self.longest_loss_streak
    }

    /// Spin history, newest first.
    pub fn history(&self) -> &VecDeque<GameHistoryRecord> {
        &self.history
    }

    pub fn can_spin(&self) -> bool {
        self.balance >= self.bet
    }

    /// Set the bet, clamped to the configured bounds. Returns the new bet.
    pub fn set_bet(&mut self, bet: u64) -> u64 {
        self.bet = bet.clamp(self.config.min_bet, self.config.max_bet);
        self.bet
    }

    /// Move the bet up or down by `steps` increments, clamped to bounds.
    pub fn adjust_bet(&mut self, steps: i64) -> u64 {
        let delta = self.config.bet_step.saturating_mul(steps.unsigned_abs());
        let target = if steps >= 0 {
            self.bet.saturating_add(delta)
        } else {
            self.bet.saturating_sub(delta)
        };
        self.set_bet(target)
    }

    pub fn top_up(&mut self, amount: u64) -> Result<u64, SessionError> {
        if amount == 0 || amount > self.config.max_topup {
            return Err(SessionError::InvalidTopup {
                amount,
                max: self.config.max_topup,
            });
        }
        self.balance += amount;
        self.total_topped_up += amount;
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<u64, SessionError> {
        if amount == 0 || amount > self.balance {
            return Err(SessionError::InvalidWithdrawal {
                amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        self.total_withdrawn += amount;
        Ok(self.balance)
    }

    /// Spin once at the current bet.
    pub fn spin(
        &mut self,
        rng: &mut impl Rng,
        sink: &mut impl NotificationSink,
    ) -> Result<SpinOutcome, SessionError> {
        if !self.can_spin() {
            return Err(SessionError::InsufficientBalance {
                balance: self.balance,
                bet: self.bet,
            });
        }

        sink.notify(&GameEvent::Spin);

        let armed = self.config.rescue_wins && rescue_armed(self.loss_streak);
        let result = if self.config.rescue_wins {
            sample_with_streak(self.loss_streak, rng)
        } else {
            sample(rng)
        };
        let bet = self.bet;
        let win = self.config.paytable.paytable().evaluate(&result, bet);

        self.balance = self.balance - bet + win;
        self.loss_streak.record(win);
        self.longest_loss_streak = self.longest_loss_streak.max(self.loss_streak.count());

        self.history.push_front(GameHistoryRecord {
            id: self.next_id,
            bet,
            result,
            win,
            timestamp: Utc::now(),
        });
        self.next_id += 1;

        if win > 0 {
            sink.notify(&GameEvent::Win { amount: win });
        } else {
            sink.notify(&GameEvent::Loss { bet });
        }

        Ok(SpinOutcome {
            result,
            bet,
            win,
            balance_after: self.balance,
            rescue_armed: armed,
        })
    }

    pub fn spin_count(&self) -> usize {
        self.history.len()
    }

    pub fn total_wagered(&self) -> u64 {
        self.history.iter().map(|r| r.bet).sum()
    }

    pub fn total_won(&self) -> u64 {
        self.history.iter().map(|r| r.win).sum()
    }

    /// Total won minus total wagered.
    pub fn net_result(&self) -> i64 {
        self.total_won() as i64 - self.total_wagered() as i64
    }

    pub fn wins(&self) -> usize {
        self.history.iter().filter(|r| r.is_win()).count()
    }

    pub fn total_topped_up(&self) -> u64 {
        self.total_topped_up
    }

    pub fn total_withdrawn(&self) -> u64 {
        self.total_withdrawn
    }
}

impl Default for SlotSession {
    fn default() -> Self {
        Self::new(SlotConfig::default())
    }
}
