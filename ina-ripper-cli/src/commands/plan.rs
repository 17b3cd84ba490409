use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ina_ripper_match::plan_downloads;

use super::{GlobalArgs, load_config, open_database};
use crate::CliError;

/// Run the `plan` command: what the downloader would fetch and tag.
pub(crate) fn run_plan(global: &GlobalArgs) -> Result<(), CliError> {
    let config = load_config(global, None, false)?;
    let db = open_database(&config)?;

    let report = plan_downloads(&db, &config.thresholds, &config.collections);

    for plan in &report.plans {
        let tags = &plan.tags;
        log::info!(
            "{}.mp3",
            plan.file_stem.if_supports_color(Stdout, |t| t.bold())
        );
        log::info!("  url:    {}", plan.url);
        log::info!("  title:  {}", tags.title);
        log::info!("  album:  {}", tags.album);
        log::info!("  track:  {}/{}", tags.track.0, tags.track.1);
        log::info!("  artist: {}", tags.artist.as_deref().unwrap_or("-"));
        log::info!("  album artist: {}", tags.album_artist.as_deref().unwrap_or("-"));
        if let Some(date) = &tags.date {
            log::info!("  date:   {}", date);
        }
        if plan.low_confidence {
            log::info!(
                "  {}",
                "media might be incorrect".if_supports_color(Stdout, |t| t.yellow())
            );
        }
        let missing = tags.missing_fields();
        if !missing.is_empty() {
            log::info!(
                "  {} {}",
                "needs manual tags:".if_supports_color(Stdout, |t| t.yellow()),
                missing.join(", ")
            );
        }
    }

    if !report.failures.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "Not planned:".if_supports_color(Stdout, |t| t.red())
        );
        for (record, error) in &report.failures {
            log::info!("  {}: {}", record, error);
        }
    }
    Ok(())
}
