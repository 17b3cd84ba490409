//! Hand-off to the external downloader and tag writer.
//!
//! A [`DownloadPlan`] carries everything the collaborator needs for one
//! consolidated record: which video to fetch, where to write it, and the
//! audio tags to set afterwards.

use std::collections::BTreeSet;

use ina_ripper_catalog::{MissingTrackInfoError, Record};
use ina_ripper_db::Database;
use thiserror::Error;

use crate::score::{MatchThresholds, NoCandidateError, select_best};

/// Prefix of a video's watch page.
pub const WATCH_URL: &str = "http://www.youtube.com/watch?v=";
pub const TAG_GENRE: &str = "Podcast";
pub const TAG_COMMENT: &str = "Downloaded with InaRipper.";

const TAG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    NoCandidate(#[from] NoCandidateError),
    #[error(transparent)]
    MissingTrackInfo(#[from] MissingTrackInfoError),
}

/// Audio tags written to the downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: String,
    pub title: String,
    /// `(number, total)`
    pub track: (u32, u32),
    pub disc: (u32, u32),
    /// Broadcast datetime, used for the release and recording dates.
    pub date: Option<String>,
    pub url: String,
    pub genre: String,
    pub comment: String,
}

impl TrackTags {
    /// Tags that could not be filled from the record's credits.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.artist.is_none() {
            missing.push("artist");
        }
        if self.album_artist.is_none() {
            missing.push("album artist");
        }
        missing
    }
}

/// Everything needed to fetch and tag one record.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadPlan {
    pub video_id: String,
    pub url: String,
    /// The selected candidate exceeded a threshold and should be checked.
    pub low_confidence: bool,
    /// Output file name without extension.
    pub file_stem: String,
    pub tags: TrackTags,
}

/// Plans built for a set of collections, with the records that could not be planned.
#[derive(Debug, Default)]
pub struct PlanReport {
    pub plans: Vec<DownloadPlan>,
    /// Display name of the record and the reason it was skipped.
    pub failures: Vec<(String, PlanError)>,
}

/// Build the download plan of a consolidated record.
pub fn plan_download(
    record: &Record,
    thresholds: &MatchThresholds,
) -> Result<DownloadPlan, PlanError> {
    let file_stem = record.filename()?;
    let selection = select_best(record, thresholds)?;
    let video_id = selection.candidate.video_id.clone();
    let url = format!("{WATCH_URL}{video_id}");
    let category = &record.category;

    let tags = TrackTags {
        artist: record.credits.author.clone(),
        album_artist: record.credits.director.clone(),
        album: category.collection_title.clone().unwrap_or_default(),
        title: record.title.clone(),
        track: (
            category.track_number.unwrap_or_default(),
            category.track_total.unwrap_or_default(),
        ),
        disc: (1, 1),
        date: record
            .schedule
            .datetime
            .map(|dt| dt.format(TAG_DATE_FORMAT).to_string()),
        url: url.clone(),
        genre: TAG_GENRE.to_string(),
        comment: TAG_COMMENT.to_string(),
    };

    Ok(DownloadPlan {
        video_id,
        url,
        low_confidence: selection.low_confidence,
        file_stem,
        tags,
    })
}

/// Plan every record of the selected collections (empty filter = all), in
/// database order.
pub fn plan_downloads(
    db: &Database,
    thresholds: &MatchThresholds,
    filter: &BTreeSet<String>,
) -> PlanReport {
    let mut report = PlanReport::default();
    for slug in db.select_slugs(filter) {
        let Some(records) = db.collection(&slug) else {
            continue;
        };
        log::info!("Planning collection {}", slug);
        for record in records {
            match plan_download(record, thresholds) {
                Ok(plan) => {
                    if plan.low_confidence {
                        log::warn!("Media {} for {} might be incorrect", plan.url, record);
                    }
                    for field in plan.tags.missing_fields() {
                        log::warn!("{} has no {}", plan.file_stem, field);
                    }
                    report.plans.push(plan);
                }
                Err(e) => {
                    log::error!("Could not plan {}: {}", record, e);
                    report.failures.push((record.to_string(), e));
                }
            }
        }
    }
    log::info!(
        "Planned {} downloads, skipped {}",
        report.plans.len(),
        report.failures.len()
    );
    report
}
