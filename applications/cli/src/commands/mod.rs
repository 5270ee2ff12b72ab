//! Subcommand implementations

pub mod simulate;
pub mod sync;
pub mod weights;

pub use simulate::{simulate, PlayedStep, SimulationReport};
pub use sync::sync;
pub use weights::{weights, CandidateWeight, WeightReport};
