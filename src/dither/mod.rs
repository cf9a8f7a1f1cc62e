//! Floyd–Steinberg error-diffusion binarization.
//!
//! Produces the {0, 255} target grids the solver fits against. Each pixel
//! is thresholded at mid-range in row-major order and the quantization
//! error is pushed onto the unvisited neighbors with the classic 7/16,
//! 3/16, 5/16, 1/16 weights.
//!
//! # References
//!
//! - Floyd & Steinberg (1976), "An Adaptive Algorithm for Spatial
//!   Greyscale", *Proceedings of the SID* 17(2), 75-77.

use crate::grid::PixelGrid;

const THRESHOLD: f32 = 128.0;

/// Binarizes a grayscale buffer (one byte per pixel, row-major).
pub fn dither_gray(luma: &[u8], width: usize, height: usize) -> Result<PixelGrid, String> {
    if luma.len() != width * height {
        return Err(format!(
            "luma buffer length {} does not match a {width}x{height} raster",
            luma.len()
        ));
    }
    let work = luma.iter().map(|&v| f32::from(v)).collect();
    PixelGrid::from_cells(width, height, diffuse(work, width, height))
}

/// Binarizes an RGBA buffer (four bytes per pixel, row-major), averaging
/// the color channels per pixel. The alpha channel is ignored.
pub fn dither_rgba(data: &[u8], width: usize, height: usize) -> Result<PixelGrid, String> {
    if data.len() != width * height * 4 {
        return Err(format!(
            "rgba buffer length {} does not match a {width}x{height} raster",
            data.len()
        ));
    }
    let work = data
        .chunks_exact(4)
        .map(|px| (f32::from(px[0]) + f32::from(px[1]) + f32::from(px[2])) / 3.0)
        .collect();
    PixelGrid::from_cells(width, height, diffuse(work, width, height))
}

/// Thresholds the working buffer in place, diffusing the error right
/// (7/16), bottom-left (3/16), bottom (5/16) and bottom-right (1/16).
/// Diffusion targets outside the raster are skipped.
fn diffuse(mut work: Vec<f32>, width: usize, height: usize) -> Vec<i32> {
    let mut out = vec![0i32; width * height];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = work[idx];
            let new = if old < THRESHOLD { 0.0 } else { 255.0 };
            out[idx] = new as i32;
            let err = old - new;
            if x + 1 < width {
                work[idx + 1] += err * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    work[idx + width - 1] += err * 3.0 / 16.0;
                }
                work[idx + width] += err * 5.0 / 16.0;
                if x + 1 < width {
                    work[idx + width + 1] += err * 1.0 / 16.0;
                }
            }
        }
    }
    out
}
