use std::cmp::Ordering;
use std::collections::HashSet;

use ina_ripper_catalog::{Candidate, Record, jaccard};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A search result as returned by the video platform, before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(alias = "video_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "duration")]
    pub duration_seconds: u32,
}

impl RawCandidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration_seconds,
        }
    }
}

/// Error thresholds above which a selected candidate is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    pub title_error: f64,
    pub duration_error: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            title_error: 0.5,
            duration_error: 0.05,
        }
    }
}

impl MatchThresholds {
    /// A candidate exceeding either threshold needs confirmation before use.
    pub fn is_low_confidence(&self, candidate: &Candidate) -> bool {
        candidate.title_error > self.title_error || candidate.duration_error > self.duration_error
    }
}

#[derive(Debug, Error)]
#[error("No media candidate for '{title}'")]
pub struct NoCandidateError {
    pub title: String,
}

/// The best candidate of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub candidate: &'a Candidate,
    pub low_confidence: bool,
}

/// Relative duration error. A zero reference duration yields the maximum
/// error of `1.0`, so ranking falls back to titles alone.
pub fn duration_error(reference_seconds: u32, candidate_seconds: u32) -> f64 {
    if reference_seconds == 0 {
        return 1.0;
    }
    let reference = f64::from(reference_seconds);
    (f64::from(candidate_seconds) - reference).abs() / reference
}

/// `1 - jaccard(reference, candidate)`, with degenerate titles (no tokens on
/// either side) scored as a total mismatch.
pub fn title_error(reference: &str, candidate: &str) -> f64 {
    1.0 - jaccard(reference, candidate).unwrap_or(0.0)
}

fn reference_title(record: &Record) -> String {
    format!("{} {}", record.category.collection, record.title)
}

/// Score one raw candidate against a record.
pub fn score_candidate(record: &Record, raw: &RawCandidate) -> Candidate {
    Candidate {
        video_id: raw.id.clone(),
        title: raw.title.clone(),
        duration_seconds: raw.duration_seconds,
        title_error: title_error(&reference_title(record), &raw.title),
        duration_error: duration_error(record.attributes.duration_seconds, raw.duration_seconds),
    }
}

/// Score, dedup by platform id (first occurrence wins) and rank a raw search
/// result list.
pub fn score_candidates(
    record: &Record,
    raw: impl IntoIterator<Item = RawCandidate>,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = raw
        .into_iter()
        .map(|c| score_candidate(record, &c))
        .collect();
    dedup_by_id(&mut candidates);
    rank(&mut candidates);
    candidates
}

/// Keep only the first occurrence of every video id.
pub fn dedup_by_id(candidates: &mut Vec<Candidate>) {
    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.video_id.clone()));
}

fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    a.title_error
        .total_cmp(&b.title_error)
        .then_with(|| a.duration_error.total_cmp(&b.duration_error))
}

/// Stable sort by `(title_error, duration_error)`, best first.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(compare);
}

/// Keep the `max` best candidates. `0` keeps all of them.
pub fn truncate_candidates(candidates: &mut Vec<Candidate>, max: usize) {
    if max > 0 {
        candidates.truncate(max);
    }
}

/// The candidate with minimal `(title_error, duration_error)`, ties going to
/// the earliest one. Stored order does not need to be ranked.
pub fn select_best<'a>(
    record: &'a Record,
    thresholds: &MatchThresholds,
) -> Result<Selection<'a>, NoCandidateError> {
    let candidate = record
        .candidates
        .iter()
        .min_by(|a, b| compare(a, b))
        .ok_or_else(|| NoCandidateError {
            title: record.title.clone(),
        })?;
    Ok(Selection {
        candidate,
        low_confidence: thresholds.is_low_confidence(candidate),
    })
}

#[cfg(test)]
#[path = "tests/score_tests.rs"]
mod tests;
