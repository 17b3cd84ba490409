//! Flat delimited encoding of a [`Record`].
//!
//! One record is one line of [`COLUMNS`] fields separated by [`DELIMITER`]:
//! ```text
//! title | collection collection_title track_number track_total program genre
//!       | diffusion_date diffusion_time diffusion_datetime diffusion_channel
//!       | link text author director | media | duration_raw duration
//! ```
//! The candidate list is a JSON blob with literal tabs removed. Lines written
//! before the media and attribute columns existed are still accepted: any
//! width from [`MIN_COLUMNS`] up to the full schema decodes, with the missing
//! trailing fields read as empty.

use crate::error::MalformedRecordError;
use crate::parse::{extract_credit, extract_duration};
use crate::types::{Attributes, Candidate, Category, Credits, Record, Schedule};

/// Field delimiter of the persisted format.
pub const DELIMITER: char = '\t';

/// Persisted column names, in order.
pub const COLUMNS: [&str; 18] = [
    "title",
    "collection",
    "collection_title",
    "track_number",
    "track_total",
    "program",
    "genre",
    "diffusion_date",
    "diffusion_time",
    "diffusion_datetime",
    "diffusion_channel",
    "link",
    "text",
    "author",
    "director",
    "media",
    "duration_raw",
    "duration",
];

/// Narrowest accepted line: everything up to and including the credits.
pub const MIN_COLUMNS: usize = 15;

const DATETIME_COLUMN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The header line for the given delimiter.
pub fn header_line(delimiter: char) -> String {
    COLUMNS.join(&delimiter.to_string())
}

impl Record {
    /// Encode the record as its persisted fields, in [`COLUMNS`] order.
    pub fn to_fields(&self) -> Vec<String> {
        let c = &self.category;
        let s = &self.schedule;
        let cr = &self.credits;
        vec![
            self.title.clone(),
            c.collection.clone(),
            opt_str(&c.collection_title),
            opt_num(c.track_number),
            opt_num(c.track_total),
            c.program.clone(),
            c.genre.clone(),
            s.date.clone(),
            s.time.clone(),
            s.datetime
                .map(|dt| dt.format(DATETIME_COLUMN_FORMAT).to_string())
                .unwrap_or_default(),
            s.channel.clone(),
            opt_str(&cr.link),
            opt_str(&cr.raw_text),
            opt_str(&cr.author),
            opt_str(&cr.director),
            encode_candidates(&self.candidates),
            self.attributes.duration_raw.clone(),
            self.attributes.duration_seconds.to_string(),
        ]
    }

    /// Decode a record from its persisted fields.
    ///
    /// The stored datetime column is ignored and re-derived from the date
    /// and time columns. Blank author/director columns are re-extracted from
    /// the credits text.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Record, MalformedRecordError> {
        if fields.len() < MIN_COLUMNS || fields.len() > COLUMNS.len() {
            return Err(MalformedRecordError::FieldCount {
                min: MIN_COLUMNS,
                max: COLUMNS.len(),
                actual: fields.len(),
            });
        }
        let get = |i: usize| fields.get(i).map(|f| f.as_ref()).unwrap_or("");

        let title = get(0).to_string();
        if title.is_empty() {
            return Err(MalformedRecordError::EmptyTitle);
        }

        let category = Category {
            collection: get(1).to_string(),
            collection_title: parse_opt_str(get(2)),
            track_number: parse_opt_num(COLUMNS[3], get(3))?,
            track_total: parse_opt_num(COLUMNS[4], get(4))?,
            program: get(5).to_string(),
            genre: get(6).to_string(),
        };

        let schedule = Schedule::new(get(7), get(8), get(10));

        let raw_text = parse_opt_str(get(12));
        let text = raw_text.as_deref().unwrap_or("");
        let credits = Credits {
            link: parse_opt_str(get(11)),
            author: parse_opt_str(get(13))
                .or_else(|| extract_credit(text, Credits::AUTHOR_MARKER)),
            director: parse_opt_str(get(14))
                .or_else(|| extract_credit(text, Credits::DIRECTOR_MARKER)),
            raw_text,
        };

        let candidates = decode_candidates(get(15))?;

        let duration_raw = parse_opt_str(get(16)).unwrap_or_default();
        let duration_seconds = match parse_opt_num(COLUMNS[17], get(17))? {
            Some(seconds) => seconds,
            None if duration_raw.is_empty() => 0,
            None => extract_duration(&duration_raw)?,
        };

        Ok(Record {
            title,
            category,
            schedule,
            credits,
            candidates,
            attributes: Attributes {
                duration_raw,
                duration_seconds,
            },
        })
    }

    /// Serialize to one delimited line (no trailing newline).
    pub fn serialize(&self, delimiter: char) -> String {
        self.to_fields().join(&delimiter.to_string())
    }

    /// Parse one delimited line produced by [`Record::serialize`].
    pub fn deserialize(line: &str, delimiter: char) -> Result<Record, MalformedRecordError> {
        let fields: Vec<&str> = line.split(delimiter).collect();
        Record::from_fields(&fields)
    }
}

fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_num(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Empty cells, and the literal `None` written by older exports, mean absent.
fn parse_opt_str(field: &str) -> Option<String> {
    match field {
        "" | "None" => None,
        other => Some(other.to_string()),
    }
}

fn parse_opt_num(
    column: &'static str,
    field: &str,
) -> Result<Option<u32>, MalformedRecordError> {
    match field {
        "" | "None" => Ok(None),
        other => other
            .parse()
            .map(Some)
            .map_err(|_| MalformedRecordError::InvalidInteger {
                column,
                value: other.to_string(),
            }),
    }
}

fn encode_candidates(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    // Serializing plain strings and numbers cannot fail.
    serde_json::to_string(candidates)
        .unwrap_or_default()
        .replace(DELIMITER, "")
}

/// Older exports stored bare id lists before candidates were scored.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum StoredCandidate {
    Id(String),
    Scored(Candidate),
}

fn decode_candidates(field: &str) -> Result<Vec<Candidate>, MalformedRecordError> {
    if field.trim().is_empty() {
        return Ok(Vec::new());
    }
    let stored: Vec<StoredCandidate> = serde_json::from_str(field)?;
    Ok(stored
        .into_iter()
        .map(|c| match c {
            StoredCandidate::Id(id) => Candidate::unscored(id),
            StoredCandidate::Scored(candidate) => candidate,
        })
        .collect())
}
