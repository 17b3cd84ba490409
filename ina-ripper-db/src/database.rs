//! In-memory record database: collections keyed by slug, in insertion order.

use std::collections::{BTreeSet, HashMap};

use ina_ripper_catalog::{RawRow, Record};

/// The records of one collection, in their current order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    /// `slugify(category.collection)` shared by every record in the group.
    pub slug: String,
    pub records: Vec<Record>,
}

/// Ordered mapping from collection slug to the records of that collection.
///
/// Collections keep the order in which their slug was first seen; records
/// within a collection keep insertion order until consolidation reorders
/// them chronologically.
#[derive(Debug, Clone, Default)]
pub struct Database {
    collections: Vec<Collection>,
    index: HashMap<String, usize>,
}

/// Counts from ingesting raw catalog rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub added: usize,
    /// Rows whose collection is not in the filter.
    pub ignored: usize,
    /// Rows that could not be parsed.
    pub failed: usize,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut db = Self::new();
        for record in records {
            db.insert(record);
        }
        db
    }

    /// Build a database from raw catalog rows. See [`Database::ingest_rows`].
    pub fn from_rows(
        rows: impl IntoIterator<Item = RawRow>,
        filter: &BTreeSet<String>,
    ) -> (Self, IngestStats) {
        let mut db = Self::new();
        let stats = db.ingest_rows(rows, filter);
        (db, stats)
    }

    /// Append a record to the collection named by its slug.
    pub fn insert(&mut self, record: Record) {
        let slug = record.collection_slug();
        let idx = match self.index.get(&slug) {
            Some(&idx) => idx,
            None => {
                self.collections.push(Collection {
                    slug: slug.clone(),
                    records: Vec::new(),
                });
                self.index.insert(slug, self.collections.len() - 1);
                self.collections.len() - 1
            }
        };
        self.collections[idx].records.push(record);
    }

    /// Parse raw catalog rows and insert those whose collection slug is in
    /// `filter` (an empty filter accepts every collection).
    ///
    /// Rows that fail to parse are logged and skipped.
    pub fn ingest_rows(
        &mut self,
        rows: impl IntoIterator<Item = RawRow>,
        filter: &BTreeSet<String>,
    ) -> IngestStats {
        let mut stats = IngestStats::default();
        for (i, row) in rows.into_iter().enumerate() {
            let record = match row.parse() {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Skipping result row {}: {}", i + 1, e);
                    stats.failed += 1;
                    continue;
                }
            };
            if !filter.is_empty() && !filter.contains(&record.collection_slug()) {
                stats.ignored += 1;
                continue;
            }
            self.insert(record);
            stats.added += 1;
        }
        log::info!(
            "Database contains {} entries ({} have been ignored, {} failed to parse)",
            self.len(),
            stats.ignored,
            stats.failed
        );
        stats
    }

    /// Records of a collection, if it exists.
    pub fn collection(&self, slug: &str) -> Option<&[Record]> {
        self.index
            .get(slug)
            .map(|&idx| self.collections[idx].records.as_slice())
    }

    pub fn collection_mut(&mut self, slug: &str) -> Option<&mut Vec<Record>> {
        self.index
            .get(slug)
            .map(|&idx| &mut self.collections[idx].records)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    pub fn collections_mut(&mut self) -> impl Iterator<Item = &mut Collection> {
        self.collections.iter_mut()
    }

    /// Collection slugs in order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|c| c.slug.as_str())
    }

    /// Every record, collection by collection.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.collections.iter().flat_map(|c| c.records.iter())
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.collections.iter().map(|c| c.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Slugs selected by `filter`, in database order. Unknown slugs in the
    /// filter are logged and skipped.
    pub fn select_slugs(&self, filter: &BTreeSet<String>) -> Vec<String> {
        for slug in filter {
            if !self.index.contains_key(slug) {
                log::warn!("Collection '{}' is not in the database", slug);
            }
        }
        self.slugs()
            .filter(|slug| filter.is_empty() || filter.contains(*slug))
            .map(str::to_string)
            .collect()
    }
}
