//! Solver state: the nail sequence, both density planes, and the running
//! score, mutated in place one move at a time.

use rand::Rng;

use super::config::Proposal;
use super::types::StrandProblem;
use crate::grid::{Nail, PixelGrid};
use crate::raster::scored_stroke;

/// A candidate nail layout plus the raster state needed to score
/// single-nail moves incrementally.
///
/// The density grids always hold exactly the strands implied by the
/// current sequence, and whenever no move is in flight the running score
/// equals the from-scratch similarity of those grids against the targets
/// (see [`Layout::rescore`]). Rejected moves revert through the same
/// rasterizer calls as the forward path, restoring the grids bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    nails: Vec<Nail>,
    front: PixelGrid,
    back: PixelGrid,
    score: i64,
}

impl Layout {
    /// Draws `problem.nails()` uniform-random positions and rasterizes the
    /// implied strands.
    pub fn new<R: Rng>(problem: &StrandProblem, rng: &mut R) -> Self {
        let nails = (0..problem.nails())
            .map(|_| Nail::random(problem.width(), problem.height(), rng))
            .collect();
        Self::from_nails(problem, nails)
    }

    /// Rasterizes an explicit sequence, e.g. to re-score a finished
    /// result. The sequence defines the strand set; each consecutive pair
    /// becomes one strand on its parity-selected plane.
    pub fn from_nails(problem: &StrandProblem, nails: Vec<Nail>) -> Self {
        let mut layout = Self {
            nails,
            front: PixelGrid::zeros(problem.width(), problem.height()),
            back: PixelGrid::zeros(problem.width(), problem.height()),
            score: 0,
        };
        // Empty density grids score the full target mass; the strands are
        // then accumulated through the same scored strokes the search
        // uses, which keeps the running score exact from the start.
        layout.score = layout.rescore(problem);
        for k in 0..layout.nails.len().saturating_sub(1) {
            let k = k as isize;
            layout.score += layout.apply_edge(problem, k, k + 1, 1);
        }
        layout
    }

    /// Draws or undraws the strand between nail indices `idx1` and `idx2`
    /// (`idx2 = idx1 + 1`), returning the similarity change.
    ///
    /// Edges reaching past either end of the sequence are defined no-ops:
    /// the first nail has no predecessor strand and the last has no
    /// successor. The plane is chosen by the lower index's parity.
    fn apply_edge(&mut self, problem: &StrandProblem, idx1: isize, idx2: isize, delta: i32) -> i64 {
        debug_assert_eq!(idx1 + 1, idx2);
        if idx1 < 0 || idx2 >= self.nails.len() as isize {
            return 0;
        }
        let from = self.nails[idx1 as usize];
        let to = self.nails[idx2 as usize];
        let (density, target) = if idx1 % 2 == 0 {
            (&mut self.front, problem.front_target())
        } else {
            (&mut self.back, problem.back_target())
        };
        scored_stroke(density, target, from, to, delta)
    }

    /// Runs one propose/accept/reject move, returning whether the move was
    /// accepted. Only strictly improving moves are kept; ties are
    /// rejected.
    ///
    /// Each move re-rasterizes at most four strands, so the cost is
    /// proportional to the strand lengths rather than the plane area.
    /// Callers needing responsiveness can drive this directly in chunks
    /// instead of going through the runner.
    pub fn step<R: Rng>(&mut self, problem: &StrandProblem, proposal: Proposal, rng: &mut R) -> bool {
        if self.nails.is_empty() {
            return false;
        }
        let idx = rng.random_range(0..self.nails.len());
        let i = idx as isize;

        let removed =
            self.apply_edge(problem, i - 1, i, -1) + self.apply_edge(problem, i, i + 1, -1);
        let old = self.nails[idx];
        self.nails[idx] = proposal.propose(old, problem.width(), problem.height(), rng);
        let added = self.apply_edge(problem, i - 1, i, 1) + self.apply_edge(problem, i, i + 1, 1);

        let candidate = self.score + removed + added;
        if candidate > self.score {
            self.score = candidate;
            return true;
        }

        // Mirror the forward calls exactly so the grids return bit-for-bit
        // and the deltas cancel to zero.
        let reverted =
            self.apply_edge(problem, i - 1, i, -1) + self.apply_edge(problem, i, i + 1, -1);
        self.nails[idx] = old;
        let redrawn =
            self.apply_edge(problem, i - 1, i, 1) + self.apply_edge(problem, i, i + 1, 1);
        debug_assert_eq!(candidate + reverted + redrawn, self.score);
        false
    }

    /// Running combined front+back similarity.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// From-scratch similarity of the density grids against the targets.
    /// Equals [`Layout::score`] whenever no move is in flight.
    pub fn rescore(&self, problem: &StrandProblem) -> i64 {
        self.front.l1_similarity(problem.front_target())
            + self.back.l1_similarity(problem.back_target())
    }

    pub fn nails(&self) -> &[Nail] {
        &self.nails
    }

    pub fn into_nails(self) -> Vec<Nail> {
        self.nails
    }

    /// Accumulated strand coverage on the front plane.
    pub fn front_density(&self) -> &PixelGrid {
        &self.front
    }

    /// Accumulated strand coverage on the back plane.
    pub fn back_density(&self) -> &PixelGrid {
        &self.back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stripe_problem(nails: usize) -> StrandProblem {
        // 8x8 with a filled band on each plane.
        let front: Vec<i32> = (0..64).map(|i| if i / 8 < 4 { 255 } else { 0 }).collect();
        let back: Vec<i32> = (0..64).map(|i| if i % 8 < 4 { 255 } else { 0 }).collect();
        StrandProblem::new(
            PixelGrid::from_cells(8, 8, front).unwrap(),
            PixelGrid::from_cells(8, 8, back).unwrap(),
            nails,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_score_matches_rescore() {
        let problem = stripe_problem(12);
        let mut rng = StdRng::seed_from_u64(42);
        let layout = Layout::new(&problem, &mut rng);
        assert_eq!(layout.score(), layout.rescore(&problem));
    }

    #[test]
    fn test_boundary_edges_are_no_ops() {
        let problem = stripe_problem(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut layout = Layout::new(&problem, &mut rng);
        let snapshot = layout.clone();

        assert_eq!(layout.apply_edge(&problem, -1, 0, 1), 0);
        assert_eq!(layout.apply_edge(&problem, 3, 4, 1), 0);
        assert_eq!(layout, snapshot);
    }

    #[test]
    fn test_strands_alternate_planes() {
        let problem = stripe_problem(3);
        let nails = vec![Nail::new(0, 0), Nail::new(0, 7), Nail::new(7, 7)];
        let layout = Layout::from_nails(&problem, nails);

        // Strand 0 (top row) lands on the front plane only, strand 1
        // (right column) on the back plane only.
        assert_eq!(layout.front_density().get(0, 3), Some(1));
        assert_eq!(layout.back_density().get(0, 3), Some(0));
        assert_eq!(layout.back_density().get(3, 7), Some(1));
        assert_eq!(layout.front_density().get(3, 7), Some(0));
    }

    #[test]
    fn test_single_nail_has_no_strands() {
        let problem = stripe_problem(1);
        let mut rng = StdRng::seed_from_u64(42);
        let mut layout = Layout::new(&problem, &mut rng);

        // Score is the all-zero-density penalty: 32 target cells of 255
        // per plane.
        assert_eq!(layout.score(), -2 * 32 * 255);
        // Every move is a zero-delta tie and must be rejected.
        for _ in 0..50 {
            assert!(!layout.step(&problem, Proposal::Uniform, &mut rng));
        }
        assert_eq!(layout.score(), -2 * 32 * 255);
    }

    #[test]
    fn test_step_keeps_score_consistent() {
        let problem = stripe_problem(10);
        let mut rng = StdRng::seed_from_u64(7);
        let mut layout = Layout::new(&problem, &mut rng);
        for _ in 0..500 {
            layout.step(&problem, Proposal::Uniform, &mut rng);
            assert_eq!(layout.score(), layout.rescore(&problem));
        }
    }

    #[test]
    fn test_rejected_step_restores_state() {
        let problem = StrandProblem::new(
            // Zero targets: after the first accepted coincidence no move
            // can improve, so every further step is a rejection.
            PixelGrid::zeros(8, 8),
            PixelGrid::zeros(8, 8),
            2,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut layout = Layout::from_nails(&problem, vec![Nail::new(2, 2), Nail::new(2, 2)]);
        let snapshot = layout.clone();
        for _ in 0..100 {
            assert!(!layout.step(&problem, Proposal::Uniform, &mut rng));
            assert_eq!(layout, snapshot);
        }
    }

    proptest! {
        #[test]
        fn manual_revert_is_exact(
            front in prop::collection::vec(0..=255i32, 36),
            back in prop::collection::vec(0..=255i32, 36),
            coords in prop::collection::vec((0..6i32, 0..6i32), 2..12),
            pick in 0..12usize,
            new_row in 0..6i32,
            new_col in 0..6i32,
        ) {
            let problem = StrandProblem::new(
                PixelGrid::from_cells(6, 6, front).unwrap(),
                PixelGrid::from_cells(6, 6, back).unwrap(),
                coords.len(),
            ).unwrap();
            let nails: Vec<Nail> = coords.iter().map(|&(r, c)| Nail::new(r, c)).collect();
            let idx = pick % nails.len();
            let i = idx as isize;

            let mut layout = Layout::from_nails(&problem, nails);
            let snapshot = layout.clone();

            // Forward: remove incident edges, swap the nail, redraw.
            let mut shift = layout.apply_edge(&problem, i - 1, i, -1)
                + layout.apply_edge(&problem, i, i + 1, -1);
            let old = layout.nails[idx];
            layout.nails[idx] = Nail::new(new_row, new_col);
            shift += layout.apply_edge(&problem, i - 1, i, 1)
                + layout.apply_edge(&problem, i, i + 1, 1);

            // Backward: the mirrored calls must cancel the shift and
            // restore both grids bit-for-bit.
            shift += layout.apply_edge(&problem, i - 1, i, -1)
                + layout.apply_edge(&problem, i, i + 1, -1);
            layout.nails[idx] = old;
            shift += layout.apply_edge(&problem, i - 1, i, 1)
                + layout.apply_edge(&problem, i, i + 1, 1);

            prop_assert_eq!(shift, 0);
            prop_assert_eq!(layout, snapshot);
        }

        #[test]
        fn random_walk_keeps_score_consistent(
            seed in 0u64..1000,
            steps in 1usize..200,
        ) {
            let problem = StrandProblem::new(
                PixelGrid::from_cells(5, 5, vec![255; 25]).unwrap(),
                PixelGrid::zeros(5, 5),
                6,
            ).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut layout = Layout::new(&problem, &mut rng);
            for _ in 0..steps {
                layout.step(&problem, Proposal::Uniform, &mut rng);
            }
            prop_assert_eq!(layout.score(), layout.rescore(&problem));
        }
    }
}
