//! SupplyNet simulation service
//!
//! Turns a user-drawn supply-chain graph into a model for an external
//! discrete-event engine, runs it, and reshapes the engine's output into
//! metrics and per-node inventory series.
//!
//! Pipeline: [`model::graph`] → [`simulation::topology`] →
//! [`simulation::synthesis`] → [`simulation::builder`] → engine →
//! [`simulation::results`].

pub mod api;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Error, Result};
pub use model::graph::SimulationRequest;
pub use simulation::builder::{build_model, SimulationModel};
pub use simulation::engine::{ProcessEngine, SimulationEngine};
pub use simulation::results::SimulationOutput;
pub use simulation::runner::run_simulation;
