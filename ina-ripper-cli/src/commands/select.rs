use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ina_ripper_match::select_best;

use super::{GlobalArgs, load_config, open_database};
use crate::CliError;

/// Run the `select` command: best stored candidate per record.
pub(crate) fn run_select(global: &GlobalArgs) -> Result<(), CliError> {
    let config = load_config(global, None, false)?;
    let db = open_database(&config)?;

    let mut selected = 0usize;
    let mut flagged = 0usize;
    let mut unmatched = 0usize;

    for slug in db.select_slugs(&config.collections) {
        let Some(records) = db.collection(&slug) else {
            continue;
        };
        log::info!("\n{}", slug.if_supports_color(Stdout, |t| t.bold()));
        for record in records {
            let track = record
                .category
                .track_number
                .map(|n| format!("{:>3}", n))
                .unwrap_or_else(|| "  -".to_string());
            match select_best(record, &config.thresholds) {
                Ok(selection) => {
                    selected += 1;
                    let c = selection.candidate;
                    let line = format!(
                        "  {} {} -> {} (title error {:.2}, duration error {:.2})",
                        track, record.title, c.video_id, c.title_error, c.duration_error
                    );
                    if selection.low_confidence {
                        flagged += 1;
                        log::info!(
                            "{} {}",
                            line,
                            "[check]".if_supports_color(Stdout, |t| t.yellow())
                        );
                    } else {
                        log::info!("{}", line);
                    }
                }
                Err(_) => {
                    unmatched += 1;
                    log::info!(
                        "  {} {} {}",
                        track,
                        record.title,
                        "no media".if_supports_color(Stdout, |t| t.red())
                    );
                }
            }
        }
    }

    crate::log_blank();
    log::info!(
        "Selected media for {} entries ({} to check), {} without media",
        selected,
        flagged,
        unmatched
    );
    Ok(())
}
