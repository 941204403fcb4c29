use image::Rgba;

use crate::pixel::PixelGrid;

/// Generated palettes never exceed this many entries.
pub const MAX_FIXED_COLORS: u32 = 256;

/// Generated palette used when color sampling is disabled.
///
/// Fewer than 8 colors give evenly spaced grays from black; otherwise the
/// largest RGB cube that fits is used. Colors that do not fill a whole cube
/// are left out.
pub fn fixed_palette(number_of_colors: u32) -> Vec<[u8; 4]> {
    let n = number_of_colors.clamp(1, MAX_FIXED_COLORS);
    if n < 8 {
        let step = 255 / (n - 1).max(1);
        return (0..n)
            .map(|i| {
                let v = (i * step) as u8;
                [v, v, v, 255]
            })
            .collect();
    }

    let edge = cube_edge(n);
    let step = 255 / (edge - 1);
    let mut palette = Vec::with_capacity((edge * edge * edge) as usize);
    for r in 0..edge {
        for g in 0..edge {
            for b in 0..edge {
                palette.push([(r * step) as u8, (g * step) as u8, (b * step) as u8, 255]);
            }
        }
    }
    palette
}

/// Largest `q` with `q³ <= n`.
fn cube_edge(n: u32) -> u32 {
    let mut q = 1;
    while (q + 1) * (q + 1) * (q + 1) <= n {
        q += 1;
    }
    q
}

/// Snap every pixel to a palette refined from [`fixed_palette`].
///
/// Each cycle after the first moves the used palette entries to the mean
/// of the pixels assigned to them; unused entries stay put.
pub fn quantize_to_fixed_palette(grid: &PixelGrid, number_of_colors: u32, cycles: u32) -> PixelGrid {
    if grid.is_empty() {
        return grid.clone();
    }
    let mut palette = fixed_palette(number_of_colors);
    for _ in 1..cycles {
        refine(&mut palette, grid.as_raw());
    }

    let mut image = grid.to_rgba_image();
    for px in image.pixels_mut() {
        *px = Rgba(palette[closest(&palette, &px.0)]);
    }
    PixelGrid::from_rgba_image(image)
}

fn refine(palette: &mut [[u8; 4]], pixels: &[u8]) {
    let mut sums = vec![([0u64; 4], 0u64); palette.len()];
    for px in pixels.chunks_exact(4) {
        let (sum, count) = &mut sums[closest(palette, px)];
        for (acc, &c) in sum.iter_mut().zip(px) {
            *acc += c as u64;
        }
        *count += 1;
    }
    for (entry, (sum, count)) in palette.iter_mut().zip(sums) {
        if count > 0 {
            *entry = sum.map(|s| (s / count) as u8);
        }
    }
}

/// Index of the nearest palette entry by summed RGBA distance; ties go to the first.
fn closest(palette: &[[u8; 4]], px: &[u8]) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (i, entry) in palette.iter().enumerate() {
        let distance: u32 = entry
            .iter()
            .zip(px)
            .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs())
            .sum();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
