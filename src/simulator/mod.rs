//! Slot session simulator for Monte Carlo analysis.
//!
//! Run thousands of simulated players to analyze:
//! - How long a bankroll lasts against the house edge
//! - How often sessions end ahead (and how rarely that lasts)
//! - What the rescue-win manipulation does to session length
//!
//! The simulator drives SlotSession (src/slots/session.rs), so results
//! match what a real player would see.

mod config;
mod report;
mod runner;
mod session_sim;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::run_simulation;
pub use session_sim::RunStats;
