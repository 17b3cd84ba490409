use thiserror::Error;

/// Errors raised while turning a raw catalog result row into a [`Record`](crate::Record).
///
/// These are per-row failures: callers log them and move on to the next row.
#[derive(Debug, Error)]
pub enum RecordParseError {
    /// The row does not have the fixed number of cells of a result row
    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    /// The title cell is blank
    #[error("row has an empty title")]
    EmptyTitle,

    /// The duration cell does not follow any of the accepted shapes
    #[error("invalid duration: {0}")]
    Duration(#[from] DurationError),
}

/// Errors raised while decoding a persisted record line.
#[derive(Debug, Error)]
pub enum MalformedRecordError {
    #[error("expected between {min} and {max} fields, got {actual}")]
    FieldCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("record has an empty title")]
    EmptyTitle,

    #[error("invalid integer in column '{column}': {value:?}")]
    InvalidInteger { column: &'static str, value: String },

    #[error("invalid candidate list: {0}")]
    Candidates(#[from] serde_json::Error),

    #[error("invalid duration: {0}")]
    Duration(#[from] DurationError),
}

/// Malformed duration text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("expected H:MM:SS, MM:SS or HH:MM:SS:FF, got {0:?}")]
    Shape(String),

    #[error("non-numeric component {component:?} in {raw:?}")]
    Component { raw: String, component: String },

    #[error("duration {0:?} is too large")]
    Overflow(String),
}

/// A filename was requested for a record that has not been through `clean` yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("track information missing for '{title}' (run clean first)")]
pub struct MissingTrackInfoError {
    pub title: String,
}
