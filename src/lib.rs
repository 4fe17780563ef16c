//! Off-net feasibility calculator.
//!
//! Replays a historical daily traffic series over a cost horizon and compares
//! serving it on-net against off-net, either per GB shipped (Canvas mode) or
//! against an SLA-sized transfer link (AWS mode).

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Result, SimulationError};
pub use model::traffic::{DailyTraffic, TrafficDataset};
pub use simulation::config::SimulationParameters;
pub use simulation::engine::{ComputeMode, CostSimulator, SimulationResults, TimelineRow, Verdict};
