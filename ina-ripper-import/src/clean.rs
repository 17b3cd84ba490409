//! Collection consolidation.
//!
//! Scraped collections contain the same broadcast several times (reruns,
//! overlapping searches) and spell the collection label inconsistently. The
//! `clean` pass turns every collection into a canonical track list:
//!
//! 1. the most frequent raw label becomes the `collection_title` of every record,
//! 2. records sharing an identity key are dropped, keeping the first,
//! 3. records are sorted by broadcast datetime (stable, undated first),
//! 4. track numbers are reassigned `1..=N` with `track_total = N`.
//!
//! Running the pass on an already clean database changes nothing.

use std::collections::{BTreeMap, HashSet};

use ina_ripper_catalog::Record;
use ina_ripper_db::Database;

use crate::progress::{CollectionTally, Pass, PassProgress};

/// Outcome of consolidating one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionCleanStats {
    pub slug: String,
    pub canonical_title: String,
    pub original: usize,
    pub kept: usize,
}

impl CollectionCleanStats {
    pub fn removed(&self) -> usize {
        self.original - self.kept
    }
}

/// Per-collection results of a `clean` pass, in database order.
#[derive(Debug, Default)]
pub struct CleanResult {
    pub collections: Vec<CollectionCleanStats>,
}

impl CleanResult {
    pub fn removed(&self) -> usize {
        self.collections.iter().map(|c| c.removed()).sum()
    }

    pub fn kept(&self) -> usize {
        self.collections.iter().map(|c| c.kept).sum()
    }
}

/// The most frequent raw collection label. Ties go to the lexicographically
/// smallest label, so the result does not depend on record order. `None` for
/// an empty slice.
pub fn canonical_title(records: &[Record]) -> Option<String> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *tally.entry(record.category.collection.as_str()).or_default() += 1;
    }
    tally
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(label, _)| label.to_string())
}

/// Consolidate one collection in place.
pub fn consolidate_collection(slug: &str, records: &mut Vec<Record>) -> CollectionCleanStats {
    let original = records.len();
    let canonical = canonical_title(records).unwrap_or_default();
    for record in records.iter_mut() {
        record.category.collection_title = Some(canonical.clone());
    }

    let mut seen = HashSet::new();
    records.retain(|r| seen.insert(r.identity_key()));
    records.sort_by(|a, b| a.cmp_schedule(b));

    let total = records.len() as u32;
    for (number, record) in (1..).zip(records.iter_mut()) {
        record.category.track_number = Some(number);
        record.category.track_total = Some(total);
    }

    CollectionCleanStats {
        slug: slug.to_string(),
        canonical_title: canonical,
        original,
        kept: records.len(),
    }
}

/// Consolidate every collection of the database.
pub fn consolidate(db: &mut Database, progress: &dyn PassProgress) -> CleanResult {
    let mut result = CleanResult::default();
    for collection in db.collections_mut() {
        progress.on_collection(Pass::Clean, &collection.slug, collection.records.len());
        let stats = consolidate_collection(&collection.slug, &mut collection.records);
        let mut tally = CollectionTally::new(&stats.slug, stats.original);
        tally.dropped = stats.removed();
        progress.on_collection_done(Pass::Clean, &tally);
        result.collections.push(stats);
    }
    log::info!(
        "Cleaned {} collections: {} entries kept, {} duplicates removed",
        result.collections.len(),
        result.kept(),
        result.removed()
    );
    result
}

#[cfg(test)]
#[path = "tests/clean_tests.rs"]
mod tests;
