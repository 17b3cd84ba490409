//! Database passes over scraped catalog records.
//!
//! `clean` consolidates each collection into a canonical, chronologically
//! numbered track list. `enrich` fills in credits and ranked media candidates
//! from external sources, which are abstracted behind the traits in
//! [`source`] so that no pass here does network I/O itself.

pub mod clean;
pub mod enrich;
pub mod progress;
pub mod source;

pub use clean::{
    CleanResult, CollectionCleanStats, canonical_title, consolidate, consolidate_collection,
};
pub use enrich::{EnrichError, EnrichOptions, EnrichStats, enrich_database, enrich_record};
pub use progress::{
    CollectionTally, LogProgress, Pass, PassProgress, RecordOutcome, SilentProgress,
};
pub use source::{
    CandidateSource, CreditsSource, JsonCandidateSource, JsonCreditsSource, SourceError,
};
