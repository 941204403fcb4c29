use std::fs;
use std::path::{Path, PathBuf};

use pixtrace::{PixtraceResult, SvgStats, TraceOptions};

use crate::cli::TraceOptionsArgs;

/// Build the trace options from an optional JSON file overlaid with command line flags.
pub fn load_trace_options(args: &TraceOptionsArgs) -> PixtraceResult<TraceOptions> {
    let base = match &args.options_file {
        Some(path) => TraceOptions::from_json(&fs::read_to_string(path)?)?,
        None => TraceOptions::default(),
    };
    Ok(base.merged_with(&args.overrides()))
}

/// Warn when individual options are set alongside a named preset, which ignores them.
pub fn warn_if_overrides_ignored(options: &TraceOptions) {
    if !options.uses_preset() {
        return;
    }
    let overrides = TraceOptions {
        preset: None,
        ..options.clone()
    };
    if overrides != TraceOptions::default() {
        eprintln!(
            "Warning: preset `{}` is used as-is; individual options are ignored. Use `--preset custom` to apply them.",
            options.preset.as_deref().unwrap_or_default()
        );
    }
}

/// Print trace statistics as text or JSON.
pub fn print_stats(stats: &SvgStats, json: bool) -> PixtraceResult<()> {
    if json {
        let text = serde_json::to_string_pretty(stats).map_err(std::io::Error::from)?;
        println!("{text}");
    } else {
        println!("Dimensions: {}x{}", stats.width, stats.height);
        println!("Paths: {}", stats.paths);
        println!("Nodes: {}", stats.nodes);
        println!("Size: {}", stats.size);
    }
    Ok(())
}

/// Derive an SVG file path by changing the extension to "svg".
pub fn derive_svg_path(input: &Path) -> PathBuf {
    let mut path = input.to_path_buf();
    path.set_extension("svg");
    path
}
