use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{GlobalArgs, load_config, open_database};
use crate::CliError;

/// Run the `stats` command: record counts per collection.
pub(crate) fn run_stats(global: &GlobalArgs) -> Result<(), CliError> {
    let config = load_config(global, None, false)?;
    let db = open_database(&config)?;

    log::info!(
        "{}",
        "Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", config.database.display());
    crate::log_blank();
    log::info!(
        "  {:<40} {:>8} {:>8} {:>8} {:>8}",
        "Collection",
        "Entries",
        "Linked",
        "Credits",
        "Media"
    );

    for slug in db.select_slugs(&config.collections) {
        let Some(records) = db.collection(&slug) else {
            continue;
        };
        let linked = records.iter().filter(|r| r.credits.link.is_some()).count();
        let credited = records
            .iter()
            .filter(|r| r.credits.raw_text.is_some())
            .count();
        let with_media = records.iter().filter(|r| !r.candidates.is_empty()).count();
        let label = match records.first().and_then(|r| r.category.collection_title.as_deref()) {
            Some(title) => title.to_string(),
            None => format!("{} (not cleaned)", slug),
        };
        log::info!(
            "  {:<40} {:>8} {:>8} {:>8} {:>8}",
            label,
            records.len(),
            linked,
            credited,
            with_media
        );
    }

    crate::log_blank();
    log::info!(
        "  {} entries in {} collections",
        db.len(),
        db.collection_count()
    );
    Ok(())
}
