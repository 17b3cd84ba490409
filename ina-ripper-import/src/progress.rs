//! Per-collection progress of the `clean` and `enrich` passes.
//!
//! A pass announces each collection it visits, reports what happened to
//! every record it touches, and closes the collection with its
//! [`CollectionTally`]. The CLI logs these; tests collect them.

use ina_ripper_catalog::Record;

/// The database pass being reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Clean,
    Enrich,
}

/// What `enrich` did with one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Candidates were stored on the record.
    Enriched { candidates: usize },
    /// Searched, but nothing came back.
    Unmatched,
    /// The credits lookup or the search failed.
    Failed,
    /// No detail-page link to enrich from.
    SkippedNoLink,
    /// Already carries candidates and the pass is additive.
    SkippedExisting,
}

/// Totals for one collection over one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionTally {
    pub slug: String,
    /// Records in the collection when the pass reached it.
    pub records: usize,
    /// Duplicates removed by `clean`.
    pub dropped: usize,
    pub enriched: usize,
    /// Candidates stored across all enriched records.
    pub candidates: usize,
    pub unmatched: usize,
    pub failed: usize,
    pub skipped_no_link: usize,
    pub skipped_existing: usize,
}

impl CollectionTally {
    pub fn new(slug: &str, records: usize) -> Self {
        Self {
            slug: slug.to_string(),
            records,
            ..Self::default()
        }
    }

    pub fn add(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Enriched { candidates } => {
                self.enriched += 1;
                self.candidates += candidates;
            }
            RecordOutcome::Unmatched => self.unmatched += 1,
            RecordOutcome::Failed => self.failed += 1,
            RecordOutcome::SkippedNoLink => self.skipped_no_link += 1,
            RecordOutcome::SkippedExisting => self.skipped_existing += 1,
        }
    }

    /// Records left in the collection after the pass.
    pub fn kept(&self) -> usize {
        self.records - self.dropped
    }

    /// Records a search was attempted for.
    pub fn searched(&self) -> usize {
        self.enriched + self.unmatched + self.failed
    }
}

/// Receiver for pass progress.
pub trait PassProgress {
    /// A collection of `records` entries is about to be processed.
    fn on_collection(&self, pass: Pass, slug: &str, records: usize);

    /// `enrich` finished with one record.
    fn on_record(&self, record: &Record, outcome: RecordOutcome);

    /// A collection is done.
    fn on_collection_done(&self, pass: Pass, tally: &CollectionTally);
}

/// Discards every update.
pub struct SilentProgress;

impl PassProgress for SilentProgress {
    fn on_collection(&self, _pass: Pass, _slug: &str, _records: usize) {}
    fn on_record(&self, _record: &Record, _outcome: RecordOutcome) {}
    fn on_collection_done(&self, _pass: Pass, _tally: &CollectionTally) {}
}

/// Reports through the `log` crate.
pub struct LogProgress;

impl PassProgress for LogProgress {
    fn on_collection(&self, pass: Pass, slug: &str, records: usize) {
        match pass {
            Pass::Clean => log::debug!("Cleaning collection {} ({} entries)", slug, records),
            Pass::Enrich => log::info!("Enriching collection {} ({} entries)", slug, records),
        }
    }

    fn on_record(&self, record: &Record, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Enriched { candidates } => {
                log::debug!("Stored {} candidates for {}", candidates, record)
            }
            RecordOutcome::SkippedNoLink => log::debug!("No detail link for {}", record),
            RecordOutcome::SkippedExisting => log::debug!("Already enriched: {}", record),
            // The pass warns with the cause.
            RecordOutcome::Unmatched | RecordOutcome::Failed => {}
        }
    }

    fn on_collection_done(&self, pass: Pass, tally: &CollectionTally) {
        match pass {
            Pass::Clean => log::info!(
                "Collection '{}' has been cleaned, going from {} to {} entries (-{})",
                tally.slug,
                tally.records,
                tally.kept(),
                tally.dropped
            ),
            Pass::Enrich => log::info!(
                "Collection '{}': {} of {} searched entries enriched ({} candidates), {} skipped",
                tally.slug,
                tally.enriched,
                tally.searched(),
                tally.candidates,
                tally.skipped_no_link + tally.skipped_existing
            ),
        }
    }
}
