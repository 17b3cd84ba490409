//! Archive catalog data model, text normalization, and the flat record codec.
//!
//! This crate defines the in-memory representation of a scraped catalog entry
//! without any storage or network dependencies. `ina-ripper-db` persists these
//! records; `ina-ripper-match` and `ina-ripper-import` operate on them.

pub mod codec;
pub mod error;
pub mod parse;
pub mod text;
pub mod types;

pub use codec::{COLUMNS, DELIMITER, MIN_COLUMNS, header_line};
pub use error::{DurationError, MalformedRecordError, MissingTrackInfoError, RecordParseError};
pub use parse::{extract_credit, extract_duration, parse_datetime};
pub use text::{jaccard, slugify, strip_accents, tokenize};
pub use types::*;
