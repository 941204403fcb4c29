//! Named tracing parameter bundles.
//!
//! The table is built once on first use and never mutated afterwards.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::config::TraceConfiguration;

static PRESETS: LazyLock<BTreeMap<&'static str, TraceConfiguration>> = LazyLock::new(|| {
    let base = default_bundle();
    BTreeMap::from([
        ("default", base.clone()),
        (
            "posterized1",
            TraceConfiguration {
                color_sampling: 0,
                number_of_colors: 2,
                ..base.clone()
            },
        ),
        (
            "posterized2",
            TraceConfiguration {
                number_of_colors: 4,
                blur_radius: 5.0,
                ..base.clone()
            },
        ),
        (
            "posterized3",
            TraceConfiguration {
                path_omit: 20,
                color_sampling: 0,
                number_of_colors: 3,
                blur_radius: 3.0,
                stroke_width: 0.0,
                ..base.clone()
            },
        ),
        (
            "curvy",
            TraceConfiguration {
                line_threshold: 0.01,
                line_filter: true,
                ..base.clone()
            },
        ),
        (
            "sharp",
            TraceConfiguration {
                quadratic_threshold: 0.01,
                line_filter: false,
                ..base.clone()
            },
        ),
        (
            "detailed",
            TraceConfiguration {
                path_omit: 0,
                round_coords: 2,
                line_threshold: 0.5,
                quadratic_threshold: 0.5,
                number_of_colors: 64,
                ..base.clone()
            },
        ),
        (
            "smoothed",
            TraceConfiguration {
                blur_radius: 5.0,
                blur_delta: 64.0,
                ..base.clone()
            },
        ),
        (
            "grayscale",
            TraceConfiguration {
                color_sampling: 0,
                color_quant_cycles: 1,
                number_of_colors: 7,
                ..base.clone()
            },
        ),
        (
            "fixedpalette",
            TraceConfiguration {
                color_sampling: 0,
                color_quant_cycles: 1,
                number_of_colors: 27,
                ..base.clone()
            },
        ),
        (
            "randomsampling1",
            TraceConfiguration {
                color_sampling: 1,
                number_of_colors: 8,
                ..base.clone()
            },
        ),
        (
            "randomsampling2",
            TraceConfiguration {
                color_sampling: 1,
                number_of_colors: 64,
                ..base.clone()
            },
        ),
        (
            "artistic1",
            TraceConfiguration {
                color_sampling: 0,
                color_quant_cycles: 1,
                path_omit: 0,
                blur_radius: 5.0,
                blur_delta: 64.0,
                line_threshold: 0.01,
                line_filter: true,
                number_of_colors: 16,
                stroke_width: 2.0,
                ..base.clone()
            },
        ),
        (
            "artistic2",
            TraceConfiguration {
                quadratic_threshold: 0.01,
                color_sampling: 0,
                color_quant_cycles: 1,
                number_of_colors: 4,
                stroke_width: 0.0,
                ..base.clone()
            },
        ),
        (
            "artistic3",
            TraceConfiguration {
                quadratic_threshold: 10.0,
                line_threshold: 10.0,
                number_of_colors: 8,
                ..base.clone()
            },
        ),
        (
            "artistic4",
            TraceConfiguration {
                quadratic_threshold: 10.0,
                line_threshold: 10.0,
                number_of_colors: 64,
                blur_radius: 5.0,
                blur_delta: 256.0,
                stroke_width: 2.0,
                ..base
            },
        ),
    ])
});

/// The `default` bundle every other preset starts from.
///
/// Unlike field-by-field resolution it keeps every color, so `mincolorratio` is 0.
fn default_bundle() -> TraceConfiguration {
    TraceConfiguration {
        min_color_ratio: 0.0,
        ..TraceConfiguration::default()
    }
}

/// Look up a preset bundle by name.
pub fn preset(name: &str) -> Option<&'static TraceConfiguration> {
    PRESETS.get(name)
}

/// All preset names in sorted order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.keys().copied()
}
