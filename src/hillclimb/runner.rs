//! Greedy search loop execution.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::SolveConfig;
use super::state::Layout;
use super::types::StrandProblem;
use crate::grid::Nail;

/// Result of a solve run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Final nail sequence.
    pub nails: Vec<Nail>,

    /// Combined front+back similarity of the final layout. Zero is a
    /// perfect match; real instances settle at some negative value.
    pub score: i64,

    /// Moves executed (equals the configured budget unless cancelled).
    pub iterations: usize,

    /// Number of accepted moves. Acceptance is strict, so every one of
    /// these improved the score.
    pub accepted_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Score at the start of the run and after every
    /// `history_interval` moves. Non-decreasing.
    pub score_history: Vec<i64>,
}

/// Executes the greedy single-nail search.
///
/// # Usage
///
/// ```ignore
/// let problem = StrandProblem::new(front, back, 256)?;
/// let config = SolveConfig::default().with_iterations(1_000_000);
/// let result = SolveRunner::run(&problem, &config);
/// println!("final score: {}", result.score);
/// ```
pub struct SolveRunner;

impl SolveRunner {
    /// Runs the full iteration budget.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`SolveConfig::validate`]
    /// first to get a descriptive error).
    pub fn run(problem: &StrandProblem, config: &SolveConfig) -> SolveResult {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The token is checked between moves only; a move in flight always
    /// completes or reverts before cancellation takes effect, so the
    /// returned layout and score are consistent.
    pub fn run_with_cancel(
        problem: &StrandProblem,
        config: &SolveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolveResult {
        config.validate().expect("invalid SolveConfig");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut layout = Layout::new(problem, &mut rng);
        let mut accepted_moves = 0usize;
        let mut cancelled = false;
        let mut completed = 0usize;
        let mut score_history = vec![layout.score()];

        for iteration in 0..config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            if layout.step(problem, config.proposal, &mut rng) {
                accepted_moves += 1;
            }
            completed = iteration + 1;

            if completed.is_multiple_of(config.history_interval) {
                score_history.push(layout.score());
            }
        }

        if score_history.last() != Some(&layout.score()) {
            score_history.push(layout.score());
        }

        SolveResult {
            score: layout.score(),
            nails: layout.into_nails(),
            iterations: completed,
            accepted_moves,
            cancelled,
            score_history,
        }
    }

    /// Runs `restarts` independent searches and keeps the best final
    /// score.
    ///
    /// Every restart owns its sequence and grids exclusively; only the
    /// finished results are compared. Seeded configs derive one seed per
    /// restart so the runs differ.
    #[cfg(feature = "parallel")]
    pub fn run_multi(problem: &StrandProblem, config: &SolveConfig, restarts: usize) -> SolveResult {
        let runs: Vec<SolveResult> = (0..restarts.max(1))
            .into_par_iter()
            .map(|i| {
                let mut per_run = config.clone();
                per_run.seed = config.seed.map(|s| s.wrapping_add(i as u64));
                Self::run(problem, &per_run)
            })
            .collect();
        runs.into_iter()
            .max_by_key(|r| r.score)
            .expect("at least one restart")
    }
}
