//! Flat-array bindings for browser callers.
//!
//! Grids cross the boundary as row-major integer arrays to keep the
//! marshalling trivial; the returned nail sequence is interleaved as
//! `[row, col, row, col, ...]`.

use wasm_bindgen::prelude::*;

use crate::dither;
use crate::grid::PixelGrid;
use crate::hillclimb::{SolveConfig, SolveRunner, StrandProblem};

#[wasm_bindgen]
pub fn solve(
    front_target: Vec<i32>,
    back_target: Vec<i32>,
    width: u32,
    height: u32,
    nails: u32,
    iterations: u32,
) -> Result<Vec<i32>, JsValue> {
    let front = PixelGrid::from_cells(width as usize, height as usize, front_target)
        .map_err(|e| JsValue::from_str(&e))?;
    let back = PixelGrid::from_cells(width as usize, height as usize, back_target)
        .map_err(|e| JsValue::from_str(&e))?;
    let problem =
        StrandProblem::new(front, back, nails as usize).map_err(|e| JsValue::from_str(&e))?;
    let config = SolveConfig::default().with_iterations(iterations as usize);

    let result = SolveRunner::run(&problem, &config);
    Ok(result
        .nails
        .iter()
        .flat_map(|nail| [nail.row, nail.col])
        .collect())
}

#[wasm_bindgen(js_name = ditherRgba)]
pub fn dither_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Vec<i32>, JsValue> {
    dither::dither_rgba(&data, width as usize, height as usize)
        .map(|grid| grid.cells().to_vec())
        .map_err(|e| JsValue::from_str(&e))
}
