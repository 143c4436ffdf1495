//! Recovery tracker: clean-day streak, milestones, savings goals and daily
//! check-ins.

pub mod logic;
pub mod types;

pub use types::{quote_for, DailyCheckin, Milestone, RecoveryData, RecoveryUpdate, SavingsGoal};
