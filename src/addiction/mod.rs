//! Day-by-day gambling addiction progression simulator.

pub mod logic;
pub mod runner;
pub mod types;

pub use logic::{advance_day, new_events, reset, run_to_end};
pub use runner::{AddictionRunner, DayStep};
pub use types::{AddictionConfig, LifeEvent, SimulationDayState};
