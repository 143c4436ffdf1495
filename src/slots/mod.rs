//! Slot machine outcome and payout engine.

pub mod paytable;
pub mod sampler;
pub mod session;
pub mod types;

pub use paytable::{evaluate, Paytable, PaytableVariant, DEFAULT_PAYTABLE};
pub use sampler::{sample, sample_with_streak};
pub use session::{SessionError, SlotConfig, SlotSession, SpinOutcome};
pub use types::{GameHistoryRecord, LossStreak, SpinResult, Symbol};
