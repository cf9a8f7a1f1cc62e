//! Greedy single-nail local search.
//!
//! A single-solution trajectory search in the simulated-annealing family,
//! run at zero temperature: each move relocates one uniformly chosen nail
//! to a proposed coordinate and keeps the change only when the rasterized
//! layout matches the targets strictly better. Scoring is incremental:
//! a move re-rasterizes at most four strands, never a whole plane, which
//! is what makes million-move budgets tractable.
//!
//! # References
//!
//! - Hoos & Stützle (2004), "Stochastic Local Search: Foundations and
//!   Applications"

mod config;
mod runner;
mod state;
mod types;

pub use config::{Proposal, SolveConfig};
pub use runner::{SolveResult, SolveRunner};
pub use state::Layout;
pub use types::StrandProblem;
