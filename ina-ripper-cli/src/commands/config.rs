use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ina_ripper_lib::settings_path;

use super::{GlobalArgs, load_config};
use crate::CliError;

/// Show the effective configuration and where it came from.
pub(crate) fn run_config_show(global: &GlobalArgs) -> Result<(), CliError> {
    let path = settings_path();
    let config = load_config(global, None, false)?;

    log::info!(
        "{}",
        "InaRipper Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let text = config
        .to_toml_string()
        .map_err(|e| CliError::config(e.to_string()))?;
    for line in text.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
