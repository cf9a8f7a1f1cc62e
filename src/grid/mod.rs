//! Grid primitives shared by the rasterizer and the solver.

use rand::Rng;

/// A nail position on the raster grid.
///
/// Coordinates are row-major and 0-indexed: `row` in `[0, height)`, `col`
/// in `[0, width)`. Stored signed so line traversal can run on plain
/// integer error terms; solver-generated nails are always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nail {
    pub row: i32,
    pub col: i32,
}

impl Nail {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Uniform draw over a grid. Both dimensions must be non-zero.
    pub fn random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        Self {
            row: rng.random_range(0..height as i32),
            col: rng.random_range(0..width as i32),
        }
    }
}

/// A height × width grid of `i32` cells in row-major order.
///
/// Serves both as a strand density accumulator (starts at zero, mutated
/// incrementally by strokes) and as a read-only binarized target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

impl PixelGrid {
    /// Creates an all-zero grid.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Wraps an existing row-major cell buffer.
    ///
    /// Fails when the buffer length does not match `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<i32>) -> Result<Self, String> {
        if cells.len() != width * height {
            return Err(format!(
                "cell buffer length {} does not match a {width}x{height} grid",
                cells.len()
            ));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell buffer.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Whether the (possibly negative) coordinate lies inside the grid.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.height && col >= 0 && (col as usize) < self.width
    }

    /// Cell value at a coordinate, `None` when out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<i32> {
        self.contains(row, col)
            .then(|| self.cells[self.index(row, col)])
    }

    /// Flat index of an in-bounds coordinate.
    pub(crate) fn index(&self, row: i32, col: i32) -> usize {
        row as usize * self.width + col as usize
    }

    /// Adds `delta` at an in-bounds coordinate.
    pub(crate) fn bump(&mut self, row: i32, col: i32, delta: i32) {
        let idx = self.index(row, col);
        self.cells[idx] += delta;
    }

    /// Σ −|self − other| over all cells, as `i64`.
    ///
    /// Zero is a perfect match; every unit of density that misses the
    /// other grid costs one point. Both grids must share dimensions.
    pub fn l1_similarity(&self, other: &PixelGrid) -> i64 {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.cells
            .iter()
            .zip(&other.cells)
            .map(|(&a, &b)| -(i64::from(a) - i64::from(b)).abs())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zeros() {
        let grid = PixelGrid::zeros(3, 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_from_cells_length_mismatch() {
        assert!(PixelGrid::from_cells(3, 3, vec![0; 8]).is_err());
        assert!(PixelGrid::from_cells(3, 3, vec![0; 9]).is_ok());
    }

    #[test]
    fn test_contains_and_get() {
        let grid = PixelGrid::from_cells(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(1, 1), Some(4));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert!(!grid.contains(2, 0));
    }

    #[test]
    fn test_l1_similarity() {
        let a = PixelGrid::from_cells(2, 2, vec![0, 255, 0, 255]).unwrap();
        let b = PixelGrid::from_cells(2, 2, vec![0, 0, 255, 255]).unwrap();
        assert_eq!(a.l1_similarity(&a), 0);
        assert_eq!(a.l1_similarity(&b), -510);
        assert_eq!(b.l1_similarity(&a), -510);
    }

    #[test]
    fn test_random_nail_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let nail = Nail::random(5, 7, &mut rng);
            assert!((0..7).contains(&nail.row));
            assert!((0..5).contains(&nail.col));
        }
    }
}
