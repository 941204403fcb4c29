use serde::{Deserialize, Serialize};

use crate::preset::preset;
use crate::{PixtraceError, PixtraceResult};

/// Preset name that selects field-by-field resolution instead of a bundle.
pub const CUSTOM_PRESET: &str = "custom";

pub const DEFAULT_LINE_THRESHOLD: f64 = 1.0;
pub const DEFAULT_QUADRATIC_THRESHOLD: f64 = 1.0;
pub const DEFAULT_PATH_OMIT: i32 = 8;
/// Deterministic sampling.
pub const DEFAULT_COLOR_SAMPLING: i32 = 2;
pub const DEFAULT_NUMBER_OF_COLORS: i32 = 16;
pub const DEFAULT_MIN_COLOR_RATIO: f64 = 0.02;
pub const DEFAULT_COLOR_QUANT_CYCLES: i32 = 3;
pub const DEFAULT_BLUR_RADIUS: f64 = 0.0;
pub const DEFAULT_BLUR_DELTA: f64 = 20.0;
pub const DEFAULT_SCALE: f64 = 1.0;
/// Round down.
pub const DEFAULT_ROUND_COORDS: i32 = 1;
pub const DEFAULT_LINE_FILTER: bool = false;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Caller-facing tracing options: an optional preset plus optional per-field overrides.
///
/// Field names on the wire follow the classic tracer option names (`ltres`,
/// `qtres`, `pathomit`, ...), so an options record can be loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    pub preset: Option<String>,
    #[serde(rename = "ltres")]
    pub line_threshold: Option<f64>,
    #[serde(rename = "qtres")]
    pub quadratic_threshold: Option<f64>,
    #[serde(rename = "pathomit")]
    pub path_omit: Option<i32>,
    #[serde(rename = "colorsampling")]
    pub color_sampling: Option<i32>,
    #[serde(rename = "numberofcolors")]
    pub number_of_colors: Option<i32>,
    #[serde(rename = "mincolorratio")]
    pub min_color_ratio: Option<f64>,
    #[serde(rename = "colorquantcycles")]
    pub color_quant_cycles: Option<i32>,
    #[serde(rename = "blurradius")]
    pub blur_radius: Option<f64>,
    #[serde(rename = "blurdelta")]
    pub blur_delta: Option<f64>,
    pub scale: Option<f64>,
    #[serde(rename = "roundcoords")]
    pub round_coords: Option<i32>,
    #[serde(rename = "linefilter")]
    pub line_filter: Option<bool>,
    #[serde(rename = "strokewidth")]
    pub stroke_width: Option<f64>,
}

impl TraceOptions {
    /// Options that select a named preset bundle.
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse an options record from JSON text.
    pub fn from_json(text: &str) -> PixtraceResult<Self> {
        serde_json::from_str(text).map_err(|e| PixtraceError::Options(e.to_string()))
    }

    pub fn with_preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    pub fn with_number_of_colors(mut self, colors: i32) -> Self {
        self.number_of_colors = Some(colors);
        self
    }

    pub fn with_path_omit(mut self, path_omit: i32) -> Self {
        self.path_omit = Some(path_omit);
        self
    }

    pub fn with_blur(mut self, radius: f64, delta: f64) -> Self {
        self.blur_radius = Some(radius);
        self.blur_delta = Some(delta);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Whether a named bundle (anything but `custom`) has been selected.
    pub fn uses_preset(&self) -> bool {
        matches!(self.preset.as_deref(), Some(name) if name != CUSTOM_PRESET)
    }

    /// Fill every field present in `overrides` into `self`, keeping the rest.
    pub fn merged_with(mut self, overrides: &TraceOptions) -> Self {
        fn pick<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        pick(&mut self.preset, &overrides.preset);
        pick(&mut self.line_threshold, &overrides.line_threshold);
        pick(&mut self.quadratic_threshold, &overrides.quadratic_threshold);
        pick(&mut self.path_omit, &overrides.path_omit);
        pick(&mut self.color_sampling, &overrides.color_sampling);
        pick(&mut self.number_of_colors, &overrides.number_of_colors);
        pick(&mut self.min_color_ratio, &overrides.min_color_ratio);
        pick(&mut self.color_quant_cycles, &overrides.color_quant_cycles);
        pick(&mut self.blur_radius, &overrides.blur_radius);
        pick(&mut self.blur_delta, &overrides.blur_delta);
        pick(&mut self.scale, &overrides.scale);
        pick(&mut self.round_coords, &overrides.round_coords);
        pick(&mut self.line_filter, &overrides.line_filter);
        pick(&mut self.stroke_width, &overrides.stroke_width);
        self
    }

    /// Resolve into a complete configuration.
    ///
    /// A named preset is used verbatim and the per-field overrides are ignored.
    /// Without a preset (or with `custom`), each field takes its override or
    /// the documented default. Values are not range-checked here; the tracing
    /// engine decides what it accepts.
    pub fn resolve(&self) -> PixtraceResult<TraceConfiguration> {
        match self.preset.as_deref() {
            Some(name) if name != CUSTOM_PRESET => preset(name)
                .cloned()
                .ok_or_else(|| PixtraceError::UnknownPreset(name.to_string())),
            _ => Ok(TraceConfiguration {
                line_threshold: self.line_threshold.unwrap_or(DEFAULT_LINE_THRESHOLD),
                quadratic_threshold: self
                    .quadratic_threshold
                    .unwrap_or(DEFAULT_QUADRATIC_THRESHOLD),
                path_omit: self.path_omit.unwrap_or(DEFAULT_PATH_OMIT),
                color_sampling: self.color_sampling.unwrap_or(DEFAULT_COLOR_SAMPLING),
                number_of_colors: self.number_of_colors.unwrap_or(DEFAULT_NUMBER_OF_COLORS),
                min_color_ratio: self.min_color_ratio.unwrap_or(DEFAULT_MIN_COLOR_RATIO),
                color_quant_cycles: self
                    .color_quant_cycles
                    .unwrap_or(DEFAULT_COLOR_QUANT_CYCLES),
                blur_radius: self.blur_radius.unwrap_or(DEFAULT_BLUR_RADIUS),
                blur_delta: self.blur_delta.unwrap_or(DEFAULT_BLUR_DELTA),
                scale: self.scale.unwrap_or(DEFAULT_SCALE),
                round_coords: self.round_coords.unwrap_or(DEFAULT_ROUND_COORDS),
                line_filter: self.line_filter.unwrap_or(DEFAULT_LINE_FILTER),
                stroke_width: self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            }),
        }
    }
}

/// Fully resolved tracing parameters handed to the tracing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfiguration {
    #[serde(rename = "ltres")]
    pub line_threshold: f64,
    #[serde(rename = "qtres")]
    pub quadratic_threshold: f64,
    #[serde(rename = "pathomit")]
    pub path_omit: i32,
    /// 0: disabled, 1: random, 2: deterministic.
    #[serde(rename = "colorsampling")]
    pub color_sampling: i32,
    #[serde(rename = "numberofcolors")]
    pub number_of_colors: i32,
    #[serde(rename = "mincolorratio")]
    pub min_color_ratio: f64,
    #[serde(rename = "colorquantcycles")]
    pub color_quant_cycles: i32,
    #[serde(rename = "blurradius")]
    pub blur_radius: f64,
    #[serde(rename = "blurdelta")]
    pub blur_delta: f64,
    pub scale: f64,
    /// Decimal places kept in path coordinates; negative disables rounding.
    #[serde(rename = "roundcoords")]
    pub round_coords: i32,
    #[serde(rename = "linefilter")]
    pub line_filter: bool,
    #[serde(rename = "strokewidth")]
    pub stroke_width: f64,
}

impl Default for TraceConfiguration {
    fn default() -> Self {
        Self {
            line_threshold: DEFAULT_LINE_THRESHOLD,
            quadratic_threshold: DEFAULT_QUADRATIC_THRESHOLD,
            path_omit: DEFAULT_PATH_OMIT,
            color_sampling: DEFAULT_COLOR_SAMPLING,
            number_of_colors: DEFAULT_NUMBER_OF_COLORS,
            min_color_ratio: DEFAULT_MIN_COLOR_RATIO,
            color_quant_cycles: DEFAULT_COLOR_QUANT_CYCLES,
            blur_radius: DEFAULT_BLUR_RADIUS,
            blur_delta: DEFAULT_BLUR_DELTA,
            scale: DEFAULT_SCALE,
            round_coords: DEFAULT_ROUND_COORDS,
            line_filter: DEFAULT_LINE_FILTER,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}
