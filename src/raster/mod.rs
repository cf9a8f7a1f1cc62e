//! Discrete line traversal and the scored stroke primitive.
//!
//! The solver's reversibility guarantee rests on two properties of this
//! module: [`line_cells`] yields the identical cell sequence every time it
//! is called with the same endpoints, and [`scored_stroke`] applies the
//! same traversal for drawing (`+1`) and undrawing (`-1`), so a stroke
//! pair is an exact no-op on both the grid and the score.

use crate::grid::{Nail, PixelGrid};

/// Iterator over every cell on the discrete line between two coordinates,
/// both endpoints included.
///
/// Integer-only Bresenham with error term `d_col - d_row`: the column
/// advances when `2·err >= -d_row`, the row when `2·err <= d_col`, and both
/// may advance in one step (diagonal). A zero-length line yields exactly
/// one cell.
#[derive(Debug, Clone)]
pub struct LineCells {
    row: i32,
    col: i32,
    end_row: i32,
    end_col: i32,
    d_row: i32,
    d_col: i32,
    step_row: i32,
    step_col: i32,
    err: i32,
    done: bool,
}

/// Starts a traversal from `from` to `to`.
pub fn line_cells(from: Nail, to: Nail) -> LineCells {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    LineCells {
        row: from.row,
        col: from.col,
        end_row: to.row,
        end_col: to.col,
        d_row,
        d_col,
        step_row: if from.row < to.row { 1 } else { -1 },
        step_col: if from.col < to.col { 1 } else { -1 },
        err: d_col - d_row,
        done: false,
    }
}

impl Iterator for LineCells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let cell = (self.row, self.col);
        if self.row == self.end_row && self.col == self.end_col {
            self.done = true;
        } else {
            let e2 = 2 * self.err;
            if e2 >= -self.d_row {
                self.err -= self.d_row;
                self.col += self.step_col;
            }
            if e2 <= self.d_col {
                self.err += self.d_col;
                self.row += self.step_row;
            }
        }
        Some(cell)
    }
}

/// Draws (`delta = 1`) or undraws (`delta = -1`) one strand onto a density
/// grid, returning the exact change in Σ −|density − target|.
///
/// Every in-bounds cell on the line gets `density += delta`; out-of-bounds
/// cells are skipped silently and contribute nothing. On a zero-sized grid
/// no cell is in bounds, so the call is a no-op returning 0.
pub fn scored_stroke(
    density: &mut PixelGrid,
    target: &PixelGrid,
    from: Nail,
    to: Nail,
    delta: i32,
) -> i64 {
    debug_assert_eq!(
        (density.width(), density.height()),
        (target.width(), target.height())
    );
    let mut shift = 0i64;
    for (row, col) in line_cells(from, to) {
        if !density.contains(row, col) {
            continue;
        }
        let idx = density.index(row, col);
        let want = i64::from(target.cells()[idx]);
        let have = i64::from(density.cells()[idx]);
        let before = -(have - want).abs();
        let after = -(have + i64::from(delta) - want).abs();
        density.bump(row, col, delta);
        shift += after - before;
    }
    shift
}
