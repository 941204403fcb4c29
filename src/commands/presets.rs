use pixtrace::{PixtraceError, PixtraceResult, preset, preset_names};

use crate::cli::PresetsCommand;

/// Run the presets command.
pub fn run(cmd: PresetsCommand) -> PixtraceResult<()> {
    let Some(name) = cmd.name else {
        for name in preset_names() {
            println!("{name}");
        }
        return Ok(());
    };

    let bundle = preset(&name).ok_or(PixtraceError::UnknownPreset(name))?;
    let json = serde_json::to_string_pretty(bundle).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}
