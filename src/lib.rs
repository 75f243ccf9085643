//! Phase saving and initial phase injection for a CDCL SAT solver
//!
//! - [Phases] keeps the best, saved and target polarity of every variable in step with the
//!   solver's variable universe.
//! - [hint] reads an init phase file into a validated [PhaseHint], which [Phases::apply]
//!   turns into a bias on the best and target phases.
//! - [generate] writes such files from ranked variable predictions.
//! - [terminate] stops the search from signal handlers and the soft time limit without
//!   allocating or locking inside the handlers.

mod assignment;
mod dimacs;
mod error;
mod inject;
mod phase;
mod phases;
mod search;
mod solver;
mod stats;

pub mod generate;
pub mod hint;
pub mod options;
pub mod terminate;

#[cfg(test)]
mod testing;

pub use assignment::Assignment;
pub use dimacs::Formula;
pub use error::{Error, Result};
pub use hint::{HintSummary, PhaseHint};
pub use options::Options;
pub use phase::{Literal, Phase, Variable};
pub use phases::{PhaseVec, Phases};
pub use search::{Outcome, Search};
pub use solver::Solver;
pub use stats::{Statistics, StatsSnapshot};
pub use terminate::{Controller, EngineHandle, TerminationFlag};
