//! Problem definition for the strand layout search.

use crate::grid::PixelGrid;

/// A double-projection string-art instance: two binarized targets of equal
/// size plus the number of nails available.
///
/// Strand `k` of a candidate layout joins nails `k` and `k + 1` and is
/// accumulated onto the front plane when `k` is even, the back plane when
/// `k` is odd.
#[derive(Debug, Clone)]
pub struct StrandProblem {
    front_target: PixelGrid,
    back_target: PixelGrid,
    nails: usize,
}

impl StrandProblem {
    /// Builds a problem instance, validating the caller contract.
    ///
    /// Both targets must share non-zero dimensions and at least one nail
    /// is required. A single nail is a legal degenerate instance with no
    /// strands.
    pub fn new(
        front_target: PixelGrid,
        back_target: PixelGrid,
        nails: usize,
    ) -> Result<Self, String> {
        if front_target.width() != back_target.width()
            || front_target.height() != back_target.height()
        {
            return Err(format!(
                "target dimensions differ: front {}x{}, back {}x{}",
                front_target.width(),
                front_target.height(),
                back_target.width(),
                back_target.height()
            ));
        }
        if front_target.width() == 0 || front_target.height() == 0 {
            return Err("targets must have non-zero dimensions".into());
        }
        if nails == 0 {
            return Err("at least one nail is required".into());
        }
        Ok(Self {
            front_target,
            back_target,
            nails,
        })
    }

    pub fn width(&self) -> usize {
        self.front_target.width()
    }

    pub fn height(&self) -> usize {
        self.front_target.height()
    }

    pub fn nails(&self) -> usize {
        self.nails
    }

    pub fn front_target(&self) -> &PixelGrid {
        &self.front_target
    }

    pub fn back_target(&self) -> &PixelGrid {
        &self.back_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_targets() {
        let problem = StrandProblem::new(PixelGrid::zeros(4, 3), PixelGrid::zeros(4, 3), 8);
        assert!(problem.is_ok());
    }

    #[test]
    fn test_rejects_mismatched_dimensions() {
        let err = StrandProblem::new(PixelGrid::zeros(4, 3), PixelGrid::zeros(3, 4), 8);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_zero_sized_targets() {
        assert!(StrandProblem::new(PixelGrid::zeros(0, 3), PixelGrid::zeros(0, 3), 8).is_err());
        assert!(StrandProblem::new(PixelGrid::zeros(3, 0), PixelGrid::zeros(3, 0), 8).is_err());
    }

    #[test]
    fn test_rejects_zero_nails() {
        assert!(StrandProblem::new(PixelGrid::zeros(4, 4), PixelGrid::zeros(4, 4), 0).is_err());
    }

    #[test]
    fn test_single_nail_is_legal() {
        assert!(StrandProblem::new(PixelGrid::zeros(4, 4), PixelGrid::zeros(4, 4), 1).is_ok());
    }
}
