//! House Edge - an educational slot machine and gambling addiction simulator.
//!
//! This crate exposes the game logic for testing and for the binaries:
//! the slot outcome and payout engine, the addiction progression
//! simulator, the learning-progress and recovery reducers, and the didactic analyses.

pub mod addiction;
pub mod analysis;
pub mod core;
pub mod notify;
pub mod progress;
pub mod recovery;
pub mod simulator;
pub mod slots;
pub mod utils;

pub use addiction::{advance_day, LifeEvent, SimulationDayState};
pub use notify::{GameEvent, NotificationSink};
pub use progress::{ProgressUpdate, UserProgress};
pub use recovery::{RecoveryData, RecoveryUpdate};
pub use slots::{evaluate, sample, sample_with_streak, LossStreak, SpinResult, Symbol};
