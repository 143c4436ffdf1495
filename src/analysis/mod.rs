//! Didactic analyses: house edge and projected losses.

pub mod house_edge;
pub mod loss_calculator;

pub use house_edge::{estimate_house_edge, exact_house_edge_percent, HouseEdgeEstimate};
pub use loss_calculator::{project_losses, LossInputs, LossProjection};
