//! Learning progress aggregate and gamification scoring.

pub mod logic;
pub mod types;

pub use types::{Goal, ProgressLevel, ProgressUpdate, UserProgress};
