use pixtrace::{PixtraceError, preset_names};

pub fn report_error(err: &PixtraceError) {
    match err {
        PixtraceError::UnknownPreset(name) => {
            eprintln!("Unknown preset `{name}`.");
            eprintln!();
            eprintln!("Available presets:");
            for name in preset_names() {
                eprintln!("  - {name}");
            }
            eprintln!("Or use `--preset custom` with individual options.");
        }
        PixtraceError::Decode(_) | PixtraceError::EmptyImage => {
            eprintln!("{err}");
            eprintln!();
            eprintln!("Supported formats: PNG, JPEG, WebP, GIF and BMP.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
