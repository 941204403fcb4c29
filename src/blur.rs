use imageproc::filter::gaussian_blur_f32;

use crate::pixel::PixelGrid;

const MAX_BLUR_RADIUS: f64 = 5.0;
const MAX_BLUR_DELTA: f64 = 1024.0;

/// Gaussian blur that leaves strong edges alone.
///
/// The radius is floored and capped at 5; below 1 the grid is returned
/// unchanged. A blurred pixel whose summed RGBA distance from the original
/// exceeds `delta` keeps its original value.
pub fn selective_blur(grid: &PixelGrid, radius: f64, delta: f64) -> PixelGrid {
    let radius = radius.floor();
    if radius.is_nan() || radius < 1.0 || grid.is_empty() {
        return grid.clone();
    }
    let radius = radius.min(MAX_BLUR_RADIUS);
    let delta = delta.abs().min(MAX_BLUR_DELTA);

    let mut image = gaussian_blur_f32(&grid.to_rgba_image(), radius as f32);
    for (out_px, original) in image.pixels_mut().zip(grid.as_raw().chunks_exact(4)) {
        let distance: f64 = out_px
            .0
            .iter()
            .zip(original)
            .map(|(&b, &o)| (b as f64 - o as f64).abs())
            .sum();
        if distance > delta {
            out_px.0.copy_from_slice(original);
        }
    }

    PixelGrid::from_rgba_image(image)
}
