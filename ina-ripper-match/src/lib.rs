//! Candidate matching: score platform search results against a catalog
//! record, rank them, select the best one, and hand it to the downloader.
//!
//! Nothing here performs I/O. Scores are plain floats where `0.0` is a
//! perfect match; the acceptance thresholds only decide whether a selection
//! should be double-checked before acting on it.

pub mod download;
pub mod score;

pub use download::{
    DownloadPlan, PlanError, PlanReport, TAG_COMMENT, TAG_GENRE, TrackTags, WATCH_URL,
    plan_download, plan_downloads,
};
pub use score::{
    MatchThresholds, NoCandidateError, RawCandidate, Selection, dedup_by_id, duration_error,
    rank, score_candidate, score_candidates, select_best, title_error,
    truncate_candidates,
};
