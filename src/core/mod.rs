//! Tunable constants shared by every module.

pub mod constants;

pub use constants::*;
