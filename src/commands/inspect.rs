use pixtrace::{Pixtrace, PixtraceResult};

use crate::cli::InspectCommand;

/// Run the inspect command.
pub fn run(cmd: InspectCommand) -> PixtraceResult<()> {
    let image = Pixtrace::default().open(&cmd.input)?;
    let (width, height) = image.pixels().dimensions();

    println!("Format: {} ({})", image.format_name(), image.mime());
    println!("File size: {} bytes", image.file_len());
    println!("Dimensions: {width}x{height}");
    println!("Animated: {}", if image.is_animated() { "yes" } else { "no" });
    for warning in image.warnings() {
        println!("Warning: {warning}");
    }

    Ok(())
}
