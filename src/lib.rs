//! Stochastic local search for double-projection string-art layouts.
//!
//! Approximates two binary target rasters (the front-lit and back-lit
//! projections of a string-art sculpture) with a single ordered sequence
//! of nails, joined by straight strands that alternate between the two
//! projection planes. The fit is measured per plane as the negative L1
//! distance between accumulated strand density and the target, and the
//! search keeps that score exact while only re-rasterizing the strands a
//! move touches.
//!
//! - **grid**: nail coordinates and the flat integer grids used for
//!   strand density and binarized targets.
//! - **raster**: deterministic Bresenham traversal and the scored stroke
//!   primitive that mutates a density grid while reporting the exact
//!   similarity change, making rejected moves exactly reversible.
//! - **dither**: Floyd–Steinberg error diffusion producing the binary
//!   targets from grayscale or RGBA input.
//! - **hillclimb**: the greedy single-nail search over a fixed iteration
//!   budget, with pluggable proposal distributions, cancellation, and
//!   optional parallel multi-start (feature `parallel`).

pub mod dither;
pub mod grid;
pub mod hillclimb;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;
