use std::path::PathBuf;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ina_ripper_import::{
    CreditsSource, EnrichOptions, JsonCandidateSource, JsonCreditsSource, LogProgress,
    enrich_database,
};

use super::{GlobalArgs, load_config, open_database, save_database};
use crate::CliError;

pub(crate) struct EnrichArgs {
    pub candidates: PathBuf,
    pub credits: Option<PathBuf>,
    pub append: bool,
    pub delay: Option<f64>,
    pub max_candidates: Option<usize>,
}

/// Run the `enrich` command against pre-fetched search and credits dumps.
pub(crate) fn run_enrich(global: &GlobalArgs, args: EnrichArgs) -> Result<(), CliError> {
    let delay = args
        .delay
        .map(Duration::try_from_secs_f64)
        .transpose()
        .map_err(|e| CliError::config(format!("Invalid delay: {}", e)))?;
    let mut config = load_config(global, delay, args.append)?;
    if let Some(max) = args.max_candidates {
        config.max_media_candidates = max;
    }

    let search = JsonCandidateSource::from_path(&args.candidates)
        .map_err(|e| CliError::input(e.to_string()))?;
    log::info!(
        "Loaded search results for {} queries from {}",
        search.len(),
        args.candidates.display()
    );
    let credits = args
        .credits
        .as_deref()
        .map(JsonCreditsSource::from_path)
        .transpose()
        .map_err(|e| CliError::input(e.to_string()))?;

    let mut db = open_database(&config)?;
    let options = EnrichOptions::from_config(&config);
    let stats = enrich_database(
        &mut db,
        credits.as_ref().map(|c| c as &dyn CreditsSource),
        &search,
        &options,
        &LogProgress,
    );

    log::info!(
        "  {} enriched, {} without media, {} errors",
        stats
            .records_enriched
            .if_supports_color(Stdout, |t| t.green()),
        stats
            .records_unmatched
            .if_supports_color(Stdout, |t| t.yellow()),
        stats.errors.if_supports_color(Stdout, |t| t.red()),
    );

    save_database(&config, &db)
}
