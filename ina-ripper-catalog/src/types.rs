//! Data model types for archive catalog records.
//!
//! A [`Record`] is one broadcast catalog entry, split into sub-records the
//! same way the persisted columns are grouped: categorization, schedule,
//! credits, media candidates, and duration attributes.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::MissingTrackInfoError;
use crate::parse;
use crate::text::slugify;

// ── Record ──────────────────────────────────────────────────────────────────

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub title: String,
    pub category: Category,
    pub schedule: Schedule,
    pub credits: Credits,
    /// Ranked media candidates. Empty until enrichment has run.
    pub candidates: Vec<Candidate>,
    pub attributes: Attributes,
}

/// Key under which two records are considered the same catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub title_slug: String,
    pub collection_title: Option<String>,
}

impl Record {
    pub fn new(title: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Category {
                collection: collection.into(),
                ..Category::default()
            },
            ..Self::default()
        }
    }

    pub fn with_schedule(
        mut self,
        date: impl Into<String>,
        time: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        self.schedule = Schedule::new(date, time, channel);
        self
    }

    /// Set the raw duration and derive seconds from it.
    ///
    /// Malformed input leaves the derived duration at zero; use
    /// [`parse::extract_duration`] directly when the error matters.
    pub fn with_duration(mut self, raw: impl Into<String>) -> Self {
        let duration_raw = raw.into();
        let duration_seconds = parse::extract_duration(&duration_raw).unwrap_or(0);
        self.attributes = Attributes {
            duration_raw,
            duration_seconds,
        };
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.credits.link = Some(link.into());
        self
    }

    /// Slug of the raw collection label; the key records are grouped under.
    pub fn collection_slug(&self) -> String {
        slugify(&self.category.collection)
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            title_slug: slugify(&self.title),
            collection_title: self.category.collection_title.clone(),
        }
    }

    /// Two records are duplicates when their identity keys match.
    pub fn is_duplicate_of(&self, other: &Record) -> bool {
        self.identity_key() == other.identity_key()
    }

    /// Chronological order by broadcast datetime. Records without a
    /// parseable datetime come first.
    pub fn cmp_schedule(&self, other: &Record) -> Ordering {
        self.schedule.datetime.cmp(&other.schedule.datetime)
    }

    /// Query string used to search the video platform for this record.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.category.collection)
    }

    /// Output file stem: `<collection>-<NN>-<title>`, track number padded
    /// to the width of the track total.
    pub fn filename(&self) -> Result<String, MissingTrackInfoError> {
        let missing = || MissingTrackInfoError {
            title: self.title.clone(),
        };
        let number = self.category.track_number.ok_or_else(missing)?;
        let total = self.category.track_total.ok_or_else(missing)?;
        let collection_title = self
            .category
            .collection_title
            .as_deref()
            .ok_or_else(missing)?;

        let width = total.to_string().len();
        Ok(format!(
            "{}-{:0width$}-{}",
            slugify(collection_title),
            number,
            slugify(&self.title),
        ))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.title, self.category.collection)?;
        if !self.schedule.date.is_empty() {
            write!(f, " ({})", self.schedule.date)?;
        }
        Ok(())
    }
}

// ── Sub-records ─────────────────────────────────────────────────────────────

/// Categorization. Track fields are only meaningful after consolidation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    /// Raw collection label as scraped, capitalization may vary.
    pub collection: String,
    /// Canonical collection label chosen by majority vote during `clean`.
    pub collection_title: Option<String>,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
    pub program: String,
    pub genre: String,
}

/// Broadcast scheduling information.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    /// `DD/MM/YYYY`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    /// Derived from `date` and `time`; `None` when they do not parse.
    pub datetime: Option<NaiveDateTime>,
    pub channel: String,
}

impl Schedule {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        let date = date.into();
        let time = time.into();
        let datetime = parse::parse_datetime(&date, &time);
        Self {
            date,
            time,
            datetime,
            channel: channel.into(),
        }
    }
}

/// Credits scraped from the record's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credits {
    /// URL of the detail page.
    pub link: Option<String>,
    /// Raw generic-information text of the detail page.
    pub raw_text: Option<String>,
    pub author: Option<String>,
    pub director: Option<String>,
}

impl Credits {
    /// Marker preceding the author list in the credits text.
    pub const AUTHOR_MARKER: &'static str = "AUT";
    /// Marker preceding the director list in the credits text.
    pub const DIRECTOR_MARKER: &'static str = "REA";

    /// Store the raw credits text and re-extract author and director from it.
    ///
    /// Tabs are removed so the text can never shift persisted columns.
    pub fn set_text(&mut self, text: &str) {
        let text = text.trim().replace('\t', "");
        self.author = parse::extract_credit(&text, Self::AUTHOR_MARKER);
        self.director = parse::extract_credit(&text, Self::DIRECTOR_MARKER);
        self.raw_text = (!text.is_empty()).then_some(text);
    }
}

/// A media item on the video platform proposed as the source of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "duration")]
    pub duration_seconds: u32,
    /// `1 - jaccard(reference, candidate title)`, in `[0, 1]`.
    #[serde(default = "max_error")]
    pub title_error: f64,
    /// Relative duration error, `>= 0`.
    #[serde(default = "max_error")]
    pub duration_error: f64,
}

fn max_error() -> f64 {
    1.0
}

impl Candidate {
    /// A candidate known only by its platform id, scored as a total mismatch.
    pub fn unscored(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: String::new(),
            duration_seconds: 0,
            title_error: max_error(),
            duration_error: max_error(),
        }
    }
}

/// Duration attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    pub duration_raw: String,
    pub duration_seconds: u32,
}

impl Attributes {
    /// Build attributes from raw duration text, deriving the seconds.
    pub fn parse(raw: impl Into<String>) -> Result<Self, crate::DurationError> {
        let duration_raw = raw.into();
        let duration_seconds = parse::extract_duration(&duration_raw)?;
        Ok(Self {
            duration_raw,
            duration_seconds,
        })
    }
}

/// A catalog result row as handed over by the scraper: the plain-text cells
/// of one table row plus the detail-page link, if the row had one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub cells: Vec<String>,
    pub link: Option<String>,
}
