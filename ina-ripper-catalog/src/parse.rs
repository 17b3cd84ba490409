//! Parsers for the scraped text fields of a catalog result row.
//!
//! A result row is a fixed sequence of table cells:
//! ```text
//! [marker] channel | date | time | duration | title | collection | program | genre
//! ```
//! plus an optional link to the entry's detail page.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{DurationError, RecordParseError};
use crate::types::{Attributes, Category, Credits, RawRow, Record, Schedule};

/// Number of cells in a catalog result row.
pub const ROW_CELLS: usize = 9;

const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const DATE_FORMAT: &str = "%d/%m/%Y";

static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AUT,(.*?) ;").expect("static pattern"));
static DIRECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"REA,(.*?) ;").expect("static pattern"));

impl Record {
    /// Build a record from the cells of a catalog result row.
    ///
    /// The first cell is the row marker and is ignored. Cells are trimmed.
    /// The broadcast datetime and the duration in seconds are derived here.
    pub fn from_row<S: AsRef<str>>(
        cells: &[S],
        link: Option<&str>,
    ) -> Result<Record, RecordParseError> {
        if cells.len() != ROW_CELLS {
            return Err(RecordParseError::CellCount {
                expected: ROW_CELLS,
                actual: cells.len(),
            });
        }
        let cell = |i: usize| cells[i].as_ref().trim().to_string();

        let title = cell(5);
        if title.is_empty() {
            return Err(RecordParseError::EmptyTitle);
        }

        let attributes = Attributes::parse(cell(4))?;

        Ok(Record {
            title,
            category: Category {
                collection: cell(6),
                program: cell(7),
                genre: cell(8),
                ..Category::default()
            },
            schedule: Schedule::new(cell(2), cell(3), cell(1)),
            credits: Credits {
                link: link
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
                ..Credits::default()
            },
            candidates: Vec::new(),
            attributes,
        })
    }
}

impl RawRow {
    pub fn parse(&self) -> Result<Record, RecordParseError> {
        Record::from_row(&self.cells, self.link.as_deref())
    }
}

/// Parse duration text into seconds.
///
/// Accepted shapes are `H:MM:SS`, `MM:SS`, and the 11-character framed form
/// `HH:MM:SS:FF` whose frame suffix is dropped. Anything else is an error.
///
/// ```
/// use ina_ripper_catalog::parse::extract_duration;
///
/// assert_eq!(extract_duration("01:02:03:04"), Ok(3723));
/// assert_eq!(extract_duration("02:03"), Ok(123));
/// assert_eq!(extract_duration("1:00:00"), Ok(3600));
/// assert!(extract_duration("two minutes").is_err());
/// ```
pub fn extract_duration(raw: &str) -> Result<u32, DurationError> {
    if !raw.is_ascii() {
        return Err(DurationError::Shape(raw.to_string()));
    }
    let normalized = match raw.len() {
        11 => raw[..8].to_string(),
        5 => format!("00:{raw}"),
        _ => raw.to_string(),
    };

    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() != 3 {
        return Err(DurationError::Shape(raw.to_string()));
    }

    let mut seconds = 0u32;
    for (factor, part) in [3600u32, 60, 1].into_iter().zip(parts) {
        let value: u32 = part.parse().map_err(|_| DurationError::Component {
            raw: raw.to_string(),
            component: part.to_string(),
        })?;
        seconds = factor
            .checked_mul(value)
            .and_then(|v| seconds.checked_add(v))
            .ok_or_else(|| DurationError::Overflow(raw.to_string()))?;
    }
    Ok(seconds)
}

/// Combine a `DD/MM/YYYY` date and a `HH:MM:SS` time.
///
/// Falls back to midnight when only the date parses. Returns `None` for an
/// empty or unparseable date.
pub fn parse_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    if date.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(date, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Extract the names following a credits marker (`AUT` or `REA`).
///
/// The catalog lists people last-name first (`AUT,DUPONT Jean ;`); the
/// tokens are reversed so the result reads first-name first. Returns `None`
/// when the marker is absent.
pub fn extract_credit(text: &str, marker: &str) -> Option<String> {
    let re = match marker {
        "AUT" => &*AUTHOR_RE,
        "REA" => &*DIRECTOR_RE,
        _ => return None,
    };
    let names = re.captures(text)?.get(1)?.as_str();
    let reversed: Vec<&str> = names.split(' ').rev().collect();
    Some(reversed.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(duration: &str, title: &str) -> Vec<String> {
        [
            "1",
            "France Inter",
            "12/03/1976",
            "20:30:00",
            duration,
            title,
            "Les Maîtres du mystère",
            "Les Maîtres du mystère",
            "Fiction radiophonique",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn framed_duration_drops_frames() {
        assert_eq!(extract_duration("01:02:03:04"), Ok(3723));
    }

    #[test]
    fn short_duration_gets_hour_prefix() {
        assert_eq!(extract_duration("02:03"), Ok(123));
    }

    #[test]
    fn plain_duration() {
        assert_eq!(extract_duration("00:58:12"), Ok(3492));
        assert_eq!(extract_duration("2:00:01"), Ok(7201));
    }

    #[test]
    fn malformed_duration_is_an_error() {
        assert!(matches!(extract_duration(""), Err(DurationError::Shape(_))));
        assert!(matches!(extract_duration("12"), Err(DurationError::Shape(_))));
        assert!(matches!(
            extract_duration("aa:bb"),
            Err(DurationError::Component { .. })
        ));
        assert!(matches!(
            extract_duration("1:2:3:4"),
            Err(DurationError::Shape(_))
        ));
    }

    #[test]
    fn datetime_from_date_and_time() {
        let dt = parse_datetime("12/03/1976", "20:30:00").unwrap();
        assert_eq!(dt.to_string(), "1976-03-12 20:30:00");
    }

    #[test]
    fn datetime_falls_back_to_date() {
        let dt = parse_datetime("12/03/1976", "").unwrap();
        assert_eq!(dt.to_string(), "1976-03-12 00:00:00");
    }

    #[test]
    fn datetime_none_for_empty_or_garbage() {
        assert_eq!(parse_datetime("", "20:30:00"), None);
        assert_eq!(parse_datetime("sometime", "20:30:00"), None);
    }

    #[test]
    fn credits_markers_are_reversed() {
        let text = "Producteur ; AUT,DARD Frédéric ; REA,BARMA Claude ; INT,X Y ;";
        assert_eq!(extract_credit(text, "AUT").as_deref(), Some("Frédéric DARD"));
        assert_eq!(extract_credit(text, "REA").as_deref(), Some("Claude BARMA"));
    }

    #[test]
    fn credits_marker_absent() {
        assert_eq!(extract_credit("INT,X Y ;", "AUT"), None);
        assert_eq!(extract_credit("AUT,unterminated", "AUT"), None);
    }

    #[test]
    fn from_row_derives_fields() {
        let record =
            Record::from_row(&row("00:45:10", "Le Train de 8h47"), Some(" /notice/1 ")).unwrap();
        assert_eq!(record.title, "Le Train de 8h47");
        assert_eq!(record.schedule.channel, "France Inter");
        assert_eq!(record.attributes.duration_seconds, 2710);
        assert!(record.schedule.datetime.is_some());
        assert_eq!(record.credits.link.as_deref(), Some("/notice/1"));
        assert_eq!(record.category.collection_title, None);
        assert_eq!(record.category.genre, "Fiction radiophonique");
    }

    #[test]
    fn from_row_rejects_wrong_shape() {
        let mut cells = row("00:45:10", "Titre");
        cells.pop();
        assert!(matches!(
            Record::from_row(&cells, None),
            Err(RecordParseError::CellCount { expected: 9, actual: 8 })
        ));
    }

    #[test]
    fn from_row_rejects_empty_title_and_bad_duration() {
        assert!(matches!(
            Record::from_row(&row("00:45:10", "  "), None),
            Err(RecordParseError::EmptyTitle)
        ));
        assert!(matches!(
            Record::from_row(&row("45 min", "Titre"), None),
            Err(RecordParseError::Duration(_))
        ));
    }
}
