use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pixtrace::TraceOptions;

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trace a raster image into an SVG
    Trace(TraceCommand),
    /// Show format, dimensions and warnings for an image
    Inspect(InspectCommand),
    /// List the preset names, or print one preset's parameters as JSON
    Presets(PresetsCommand),
}

#[derive(Args, Debug)]
pub struct TraceCommand {
    /// Input image path (png, jpeg, webp, gif or bmp)
    pub input: PathBuf,
    /// Output SVG path (defaults to input name with `.svg`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Keep the tracer's whitespace instead of compacting the SVG
    #[arg(long = "no-optimize")]
    pub no_optimize: bool,
    /// Print the statistics as JSON
    #[arg(long = "stats-json")]
    pub stats_json: bool,
    #[command(flatten)]
    pub trace_options: TraceOptionsArgs,
}

#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Input image path
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct PresetsCommand {
    /// Preset to print; lists all names when omitted
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct TraceOptionsArgs {
    /// Named parameter preset; `custom` uses the individual options below
    #[arg(long, env = "PIXTRACE_PRESET")]
    pub preset: Option<String>,
    /// JSON file with an options record; flags given here take precedence
    #[arg(long = "options", value_name = "FILE")]
    pub options_file: Option<PathBuf>,
    /// Error threshold for straight lines
    #[arg(long = "ltres")]
    pub line_threshold: Option<f64>,
    /// Error threshold for quadratic splines
    #[arg(long = "qtres")]
    pub quadratic_threshold: Option<f64>,
    /// Paths shorter than this are omitted
    #[arg(long = "pathomit", allow_negative_numbers = true)]
    pub path_omit: Option<i32>,
    /// Color sampling (0: disabled, 1: random, 2: deterministic)
    #[arg(long = "colorsampling")]
    pub color_sampling: Option<i32>,
    /// Number of colors in the palette
    #[arg(long = "numberofcolors", allow_negative_numbers = true)]
    pub number_of_colors: Option<i32>,
    /// Minimum share of pixels a color needs to keep its layer
    #[arg(long = "mincolorratio")]
    pub min_color_ratio: Option<f64>,
    /// Color quantization cycles
    #[arg(long = "colorquantcycles")]
    pub color_quant_cycles: Option<i32>,
    /// Selective blur radius (0 disables blur)
    #[arg(long = "blurradius")]
    pub blur_radius: Option<f64>,
    /// Selective blur delta
    #[arg(long = "blurdelta")]
    pub blur_delta: Option<f64>,
    /// Output scale
    #[arg(long)]
    pub scale: Option<f64>,
    /// Decimal places kept in coordinates (negative disables rounding)
    #[arg(long = "roundcoords", allow_negative_numbers = true)]
    pub round_coords: Option<i32>,
    /// Filter out line-like specks
    #[arg(long = "linefilter", num_args = 0..=1, default_missing_value = "true")]
    pub line_filter: Option<bool>,
    /// Stroke width added to every path (0 disables strokes)
    #[arg(long = "strokewidth")]
    pub stroke_width: Option<f64>,
}

impl TraceOptionsArgs {
    /// The options given on the command line, without the options file.
    pub fn overrides(&self) -> TraceOptions {
        TraceOptions {
            preset: self.preset.clone(),
            line_threshold: self.line_threshold,
            quadratic_threshold: self.quadratic_threshold,
            path_omit: self.path_omit,
            color_sampling: self.color_sampling,
            number_of_colors: self.number_of_colors,
            min_color_ratio: self.min_color_ratio,
            color_quant_cycles: self.color_quant_cycles,
            blur_radius: self.blur_radius,
            blur_delta: self.blur_delta,
            scale: self.scale,
            round_coords: self.round_coords,
            line_filter: self.line_filter,
            stroke_width: self.stroke_width,
        }
    }
}
