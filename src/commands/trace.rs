use std::fs;

use pixtrace::{Pixtrace, PixtraceResult};

use crate::cli::TraceCommand;

use super::utils::{derive_svg_path, load_trace_options, print_stats, warn_if_overrides_ignored};

/// The main function to run the trace command.
pub fn run(cmd: TraceCommand) -> PixtraceResult<()> {
    let options = load_trace_options(&cmd.trace_options)?;
    warn_if_overrides_ignored(&options);

    let pixtrace = Pixtrace::default().with_default_options(options);
    let image = pixtrace.open(&cmd.input)?;
    for warning in image.warnings() {
        eprintln!("Warning: {warning}");
    }

    let traced = image.trace(None)?;
    let document = if cmd.no_optimize {
        traced
    } else {
        traced.optimized()
    };

    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_svg_path(&cmd.input));
    fs::write(&output_path, document.markup())?;
    println!("SVG saved to {}", output_path.display());

    print_stats(document.stats(), cmd.stats_json)
}
