//! Solver configuration and proposal distributions.

use crate::grid::Nail;
use rand::Rng;

/// Distribution used to draw the replacement coordinate for a selected
/// nail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Proposal {
    /// Independent uniform draw over the whole grid. Slow mixing but every
    /// position stays reachable in one move.
    #[default]
    Uniform,

    /// Step of at most `radius` cells per axis from the current position,
    /// clamped to the grid. Tighter exploration around the current layout.
    Neighborhood {
        /// Maximum per-axis displacement, at least 1.
        radius: i32,
    },
}

impl Proposal {
    /// Draws a replacement for `current` within a non-empty grid.
    pub fn propose<R: Rng>(
        &self,
        current: Nail,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Nail {
        match *self {
            Proposal::Uniform => Nail::random(width, height, rng),
            Proposal::Neighborhood { radius } => Nail::new(
                (current.row + rng.random_range(-radius..=radius)).clamp(0, height as i32 - 1),
                (current.col + rng.random_range(-radius..=radius)).clamp(0, width as i32 - 1),
            ),
        }
    }
}

/// Configuration for the greedy strand search.
///
/// # Examples
///
/// ```
/// use strand_search::hillclimb::{Proposal, SolveConfig};
///
/// let config = SolveConfig::default()
///     .with_iterations(500_000)
///     .with_proposal(Proposal::Neighborhood { radius: 2 })
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveConfig {
    /// Iteration budget. The search runs exactly this many moves; there is
    /// no convergence check or early exit.
    pub iterations: usize,

    /// Replacement-coordinate distribution.
    pub proposal: Proposal,

    /// Interval at which the running score is sampled into the result's
    /// history.
    pub history_interval: usize,

    /// Random seed for reproducibility. Unseeded runs draw one from the
    /// system RNG.
    pub seed: Option<u64>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            proposal: Proposal::default(),
            history_interval: 10_000,
            seed: None,
        }
    }
}

impl SolveConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_proposal(mut self, proposal: Proposal) -> Self {
        self.proposal = proposal;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.history_interval == 0 {
            return Err("history_interval must be positive".into());
        }
        if let Proposal::Neighborhood { radius } = self.proposal {
            if radius < 1 {
                return Err(format!("neighborhood radius must be at least 1, got {radius}"));
            }
        }
        Ok(())
    }
}
