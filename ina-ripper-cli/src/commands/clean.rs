use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ina_ripper_import::{LogProgress, consolidate};

use super::{GlobalArgs, load_config, open_database, save_database};
use crate::CliError;

/// Run the `clean` command: consolidate every collection and save.
pub(crate) fn run_clean(global: &GlobalArgs) -> Result<(), CliError> {
    let config = load_config(global, None, false)?;
    let mut db = open_database(&config)?;

    log::info!(
        "{}",
        "Cleaning collections...".if_supports_color(Stdout, |t| t.bold()),
    );
    let result = consolidate(&mut db, &LogProgress);

    let removed = result.removed();
    if removed == 0 {
        log::info!(
            "  {}",
            "No duplicates found.".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Removed {} duplicates across {} collections",
            removed.if_supports_color(Stdout, |t| t.yellow()),
            result.collections.iter().filter(|c| c.removed() > 0).count(),
        );
    }

    save_database(&config, &db)
}
