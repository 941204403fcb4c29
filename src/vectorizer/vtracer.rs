use visioncortex::PathSimplifyMode;
use vtracer::{ColorImage, ColorMode, Config, Hierarchical, SvgFile, convert};

use crate::blur::selective_blur;
use crate::config::TraceConfiguration;
use crate::markup::{Decoration, decorate_svg};
use crate::palette::quantize_to_fixed_palette;
use crate::pixel::PixelGrid;
use crate::{PixtraceError, PixtraceResult};

use super::Vectorizer;

/// Corner threshold in degrees; the classic option set has no counterpart.
const CORNER_THRESHOLD: i32 = 60;
/// Speckle floor applied when the line filter is on.
const LINE_FILTER_SPECKLE: usize = 4;
const MIN_LENGTH_THRESHOLD: f64 = 3.5;
const MAX_LENGTH_THRESHOLD: f64 = 10.0;

/// VTracer-based SVG vectorizer implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct VtracerVectorizer;

impl Vectorizer for VtracerVectorizer {
    fn vectorize(&self, grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<String> {
        trace_to_svg_string(grid, config)
    }
}

/// Trace a pixel grid to SVG markup with VTracer.
///
/// Blur runs before tracing, followed by fixed palette quantization when
/// `colorsampling` is 0. Scale and stroke are applied to the markup afterwards.
pub fn trace_to_svg_string(grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<String> {
    check_traceable(grid, config)?;

    let mut source = selective_blur(grid, config.blur_radius, config.blur_delta);
    if config.color_sampling == 0 {
        source = quantize_to_fixed_palette(
            &source,
            config.number_of_colors.max(1) as u32,
            config.color_quant_cycles.max(1) as u32,
        );
    }
    let svg_file = trace(source.to_color_image(), config)?;
    decorate_svg(
        &svg_file.to_string(),
        &Decoration {
            scale: config.scale,
            stroke_width: config.stroke_width,
        },
    )
}

/// Trace a ColorImage into an SVG using VTracer with the given configuration.
pub fn trace(img: ColorImage, config: &TraceConfiguration) -> PixtraceResult<SvgFile> {
    let svg_file = convert(img, vtracer_config(config)).map_err(PixtraceError::Trace)?;
    Ok(svg_file)
}

/// Map the classic tracer parameters onto VTracer's configuration.
pub fn vtracer_config(config: &TraceConfiguration) -> Config {
    let colors = config.number_of_colors.max(1) as u32;
    // Bits needed to index the palette, plus headroom for gradients.
    let palette_bits = u32::BITS - (colors - 1).leading_zeros();
    let color_precision = (palette_bits as i32 + 2).clamp(1, 8);
    // Fewer colors merge more aggressively.
    let layer_difference = (config.min_color_ratio * 800.0)
        .round()
        .max((256 / colors) as f64)
        .clamp(0.0, 255.0) as i32;

    let mut filter_speckle = config.path_omit.max(0) as usize;
    if config.line_filter {
        filter_speckle = filter_speckle.max(LINE_FILTER_SPECKLE);
    }

    Config {
        color_mode: ColorMode::Color,
        hierarchical: Hierarchical::Stacked,
        mode: PathSimplifyMode::Spline,
        filter_speckle,
        color_precision,
        layer_difference,
        corner_threshold: CORNER_THRESHOLD,
        length_threshold: (config.line_threshold * 4.0)
            .clamp(MIN_LENGTH_THRESHOLD, MAX_LENGTH_THRESHOLD),
        max_iterations: config.color_quant_cycles.max(1) as usize,
        splice_threshold: (config.quadratic_threshold * 45.0).round().clamp(0.0, 180.0) as i32,
        path_precision: u32::try_from(config.round_coords).ok(),
    }
}

/// Reject grids and parameters VTracer cannot work with.
fn check_traceable(grid: &PixelGrid, config: &TraceConfiguration) -> PixtraceResult<()> {
    let reject = |msg: String| Err(PixtraceError::Trace(msg));

    if grid.is_empty() {
        let (w, h) = grid.dimensions();
        return reject(format!("cannot trace a {w}x{h} image"));
    }
    if config.number_of_colors < 1 {
        return reject(format!(
            "numberofcolors must be at least 1, got {}",
            config.number_of_colors
        ));
    }
    if config.path_omit < 0 {
        return reject(format!(
            "pathomit must not be negative, got {}",
            config.path_omit
        ));
    }
    if !config.scale.is_finite() || config.scale <= 0.0 {
        return reject(format!("scale must be positive, got {}", config.scale));
    }
    if !config.stroke_width.is_finite() || config.stroke_width < 0.0 {
        return reject(format!(
            "strokewidth must not be negative, got {}",
            config.stroke_width
        ));
    }
    let finite = [
        ("ltres", config.line_threshold),
        ("qtres", config.quadratic_threshold),
        ("mincolorratio", config.min_color_ratio),
        ("blurradius", config.blur_radius),
        ("blurdelta", config.blur_delta),
    ];
    if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
        return reject(format!("{name} must be a finite number, got {value}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> PixelGrid {
        PixelGrid::filled(w, h, [200, 30, 30, 255])
    }

    mod vtracer_config {
        use super::*;

        #[test]
        fn defaults_map_to_vtracer_defaults() {
            let cfg = vtracer_config(&TraceConfiguration::default());
            assert!(matches!(cfg.color_mode, ColorMode::Color));
            assert_eq!(cfg.color_precision, 6);
            assert_eq!(cfg.layer_difference, 16);
            assert_eq!(cfg.filter_speckle, 8);
            assert_eq!(cfg.length_threshold, 4.0);
            assert_eq!(cfg.splice_threshold, 45);
            assert_eq!(cfg.max_iterations, 3);
            assert_eq!(cfg.path_precision, Some(1));
        }

        #[test]
        fn two_colors_stay_in_color_mode() {
            let config = TraceConfiguration {
                number_of_colors: 2,
                min_color_ratio: 0.0,
                ..TraceConfiguration::default()
            };
            let cfg = vtracer_config(&config);
            assert!(matches!(cfg.color_mode, ColorMode::Color));
            assert_eq!(cfg.color_precision, 3);
            assert_eq!(cfg.layer_difference, 128);
        }

        #[test]
        fn many_colors_cap_precision() {
            let config = TraceConfiguration {
                number_of_colors: 1000,
                ..TraceConfiguration::default()
            };
            assert_eq!(vtracer_config(&config).color_precision, 8);
        }

        #[test]
        fn line_filter_raises_speckle_floor() {
            let config = TraceConfiguration {
                path_omit: 0,
                line_filter: true,
                ..TraceConfiguration::default()
            };
            assert_eq!(vtracer_config(&config).filter_speckle, 4);
        }

        #[test]
        fn negative_round_coords_disable_precision() {
            let config = TraceConfiguration {
                round_coords: -1,
                ..TraceConfiguration::default()
            };
            assert_eq!(vtracer_config(&config).path_precision, None);
        }

        #[test]
        fn thresholds_stay_in_vtracer_range() {
            let config = TraceConfiguration {
                line_threshold: 0.01,
                quadratic_threshold: 10.0,
                ..TraceConfiguration::default()
            };
            let cfg = vtracer_config(&config);
            assert_eq!(cfg.length_threshold, MIN_LENGTH_THRESHOLD);
            assert_eq!(cfg.splice_threshold, 180);
        }
    }

    mod check_traceable {
        use super::*;

        #[test]
        fn accepts_defaults() {
            assert!(check_traceable(&solid(2, 2), &TraceConfiguration::default()).is_ok());
        }

        #[test]
        fn rejects_degenerate_grid() {
            let grid = PixelGrid::new(0, 4, Vec::new()).unwrap();
            let err = check_traceable(&grid, &TraceConfiguration::default()).unwrap_err();
            assert!(err.to_string().contains("0x4"), "{err}");
        }

        #[test]
        fn rejects_out_of_range_parameters() {
            let bad = [
                TraceConfiguration {
                    number_of_colors: 0,
                    ..TraceConfiguration::default()
                },
                TraceConfiguration {
                    path_omit: -1,
                    ..TraceConfiguration::default()
                },
                TraceConfiguration {
                    scale: 0.0,
                    ..TraceConfiguration::default()
                },
                TraceConfiguration {
                    stroke_width: -2.0,
                    ..TraceConfiguration::default()
                },
                TraceConfiguration {
                    line_threshold: f64::NAN,
                    ..TraceConfiguration::default()
                },
            ];
            for config in bad {
                assert!(
                    matches!(
                        check_traceable(&solid(2, 2), &config),
                        Err(PixtraceError::Trace(_))
                    ),
                    "{config:?}"
                );
            }
        }
    }

    mod trace_to_svg_string {
        use super::*;

        #[test]
        fn solid_grid_produces_a_path() {
            let svg = trace_to_svg_string(&solid(10, 10), &TraceConfiguration::default()).unwrap();
            assert!(svg.contains("<svg"), "{svg}");
            assert!(svg.contains("<path"), "{svg}");
            assert!(svg.contains("stroke-width=\"1\""), "{svg}");
        }

        #[test]
        fn scale_is_applied_to_root() {
            let config = TraceConfiguration {
                scale: 2.0,
                stroke_width: 0.0,
                ..TraceConfiguration::default()
            };
            let svg = trace_to_svg_string(&solid(10, 10), &config).unwrap();
            assert!(svg.contains("width=\"20\""), "{svg}");
            assert!(svg.contains("viewBox=\"0 0 10 10\""), "{svg}");
            assert!(!svg.contains("stroke-width"), "{svg}");
        }

        #[test]
        fn two_colors_keep_light_regions() {
            let config = TraceConfiguration {
                number_of_colors: 2,
                ..TraceConfiguration::default()
            };
            let light = PixelGrid::filled(12, 8, [255, 255, 0, 255]);
            let svg = trace_to_svg_string(&light, &config).unwrap();
            assert!(svg.contains("<path"), "{svg}");
        }

        #[test]
        fn disabled_sampling_traces_fixed_palette_colors() {
            let config = TraceConfiguration {
                color_sampling: 0,
                number_of_colors: 2,
                color_quant_cycles: 1,
                ..TraceConfiguration::default()
            };
            let svg = trace_to_svg_string(&solid(10, 10), &config).unwrap();
            // Dark red snaps to black.
            assert!(svg.contains("fill=\"#000000\""), "{svg}");
        }
    }
}
