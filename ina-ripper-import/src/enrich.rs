//! Enrichment pass: credits text and ranked media candidates per record.
//!
//! Only records with a detail-page link are enriched. Requests are paced so
//! the remote services see at most one record per `delay`. A failing record
//! is logged and counted; it never aborts the pass.

use std::collections::BTreeSet;
use std::time::Duration;

use ina_ripper_catalog::Record;
use ina_ripper_db::Database;
use ina_ripper_lib::{Config, IterPacingExt};
use ina_ripper_match::{score_candidates, truncate_candidates};
use thiserror::Error;

use crate::progress::{CollectionTally, Pass, PassProgress, RecordOutcome};
use crate::source::{CandidateSource, CreditsSource, SourceError};

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Credits lookup failed for {link}: {source}")]
    Credits { link: String, source: SourceError },
    #[error("Search failed for '{query}': {source}")]
    Search { query: String, source: SourceError },
}

/// Options for the enrichment pass.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Which collections to enrich (empty = all collections).
    pub collections: BTreeSet<String>,
    /// Skip records that already carry candidates.
    pub append: bool,
    /// Minimum interval between two enriched records.
    pub delay: Duration,
    /// Candidates kept per record after ranking (0 = all).
    pub max_candidates: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl EnrichOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            collections: config.collections.clone(),
            append: config.append,
            delay: config.delay,
            max_candidates: config.max_media_candidates,
        }
    }
}

/// Statistics from an enrichment run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    pub records_processed: usize,
    pub records_enriched: usize,
    /// Searched, but the platform had nothing.
    pub records_unmatched: usize,
    pub skipped_no_link: usize,
    pub skipped_existing: usize,
    pub errors: usize,
}

impl EnrichStats {
    fn absorb(&mut self, tally: &CollectionTally) {
        self.records_processed += tally.searched();
        self.records_enriched += tally.enriched;
        self.records_unmatched += tally.unmatched;
        self.skipped_no_link += tally.skipped_no_link;
        self.skipped_existing += tally.skipped_existing;
        self.errors += tally.failed;
    }
}

/// Enrich a single record. Returns the number of candidates stored.
///
/// Credits are looked up only when a credits source is given. On a search
/// failure the record's previous candidates are left in place.
pub fn enrich_record(
    record: &mut Record,
    credits: Option<&dyn CreditsSource>,
    candidates: &dyn CandidateSource,
    max_candidates: usize,
) -> Result<usize, EnrichError> {
    if let (Some(source), Some(link)) = (credits, record.credits.link.clone()) {
        let text = source
            .fetch_credits(&link)
            .map_err(|source| EnrichError::Credits {
                link: link.clone(),
                source,
            })?;
        match text {
            Some(text) => record.credits.set_text(&text),
            None => log::debug!("No credits section at {}", link),
        }
    }

    let query = record.search_query();
    let raw = candidates
        .search(&query)
        .map_err(|source| EnrichError::Search {
            query: query.clone(),
            source,
        })?;
    let mut scored = score_candidates(record, raw);
    truncate_candidates(&mut scored, max_candidates);
    let count = scored.len();
    record.candidates = scored;
    Ok(count)
}

/// Enrich every selected collection of the database in place.
pub fn enrich_database(
    db: &mut Database,
    credits: Option<&dyn CreditsSource>,
    candidates: &dyn CandidateSource,
    options: &EnrichOptions,
    progress: &dyn PassProgress,
) -> EnrichStats {
    let mut stats = EnrichStats::default();

    for slug in db.select_slugs(&options.collections) {
        let Some(records) = db.collection_mut(&slug) else {
            continue;
        };
        progress.on_collection(Pass::Enrich, &slug, records.len());
        let mut tally = CollectionTally::new(&slug, records.len());

        let mut pending = Vec::new();
        for record in records.iter_mut() {
            let skipped = if record.credits.link.is_none() {
                RecordOutcome::SkippedNoLink
            } else if options.append && !record.candidates.is_empty() {
                RecordOutcome::SkippedExisting
            } else {
                pending.push(record);
                continue;
            };
            tally.add(skipped);
            progress.on_record(record, skipped);
        }

        let total = pending.len();
        let paced = pending
            .into_iter()
            .paced(options.delay)
            .tracked(total, |r| format!("Enriching {}", r));
        for record in paced {
            let outcome = match enrich_record(record, credits, candidates, options.max_candidates) {
                Ok(0) => {
                    log::warn!("No media found for {}", record);
                    RecordOutcome::Unmatched
                }
                Ok(n) => RecordOutcome::Enriched { candidates: n },
                Err(e) => {
                    log::warn!("Could not enrich {}: {}", record, e);
                    RecordOutcome::Failed
                }
            };
            tally.add(outcome);
            progress.on_record(record, outcome);
        }

        progress.on_collection_done(Pass::Enrich, &tally);
        stats.absorb(&tally);
    }

    log::info!(
        "Enriched {} entries ({} without media, {} errors, {} without link, {} already enriched)",
        stats.records_enriched,
        stats.records_unmatched,
        stats.errors,
        stats.skipped_no_link,
        stats.skipped_existing
    );
    stats
}

#[cfg(test)]
#[path = "tests/enrich_tests.rs"]
mod tests;
