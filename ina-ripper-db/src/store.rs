//! Reading and writing the database file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ina_ripper_catalog::{COLUMNS, DELIMITER, MIN_COLUMNS, MalformedRecordError, Record};
use thiserror::Error;

use crate::database::Database;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid database format: {0}")]
    Format(String),
    #[error("Malformed record on line {line}: {source}")]
    Malformed {
        line: u64,
        source: MalformedRecordError,
    },
    #[error("Delimiter {0:?} is not ASCII or would corrupt encoded fields")]
    InvalidDelimiter(char),
}

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file was rewritten with this many lines (header included).
    Saved { lines: usize },
    /// The caller declined to overwrite the existing file.
    Declined,
}

/// A database file on disk.
#[derive(Debug, Clone)]
pub struct DatabaseFile {
    path: PathBuf,
    delimiter: u8,
}

impl DatabaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DELIMITER as u8,
        }
    }

    /// Use another field delimiter.
    ///
    /// The delimiter is stripped from every field on write, so characters the
    /// dates, durations or candidate JSON depend on are refused.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self, DatabaseError> {
        if !is_safe_delimiter(delimiter) {
            return Err(DatabaseError::InvalidDelimiter(delimiter));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record, grouped by collection slug in file order.
    ///
    /// A missing or unknown header, or any malformed line, fails the whole load.
    pub fn load(&self) -> Result<Database, DatabaseError> {
        log::info!("Loading database at {}", self.path.display());
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let db = self.read_from(file)?;
        log::info!(
            "Loaded {} entries in the database, organized in {} collections",
            db.len(),
            db.collection_count()
        );
        Ok(db)
    }

    /// Decode a database from any reader.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Database, DatabaseError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut rows = reader.records();
        let header = match rows.next() {
            Some(row) => row?,
            None => return Err(DatabaseError::Format("missing header line".to_string())),
        };
        check_header(header.iter().collect())?;

        let mut db = Database::new();
        for row in rows {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<&str> = row.iter().collect();
            let record = Record::from_fields(&fields)
                .map_err(|source| DatabaseError::Malformed { line, source })?;
            db.insert(record);
        }
        Ok(db)
    }

    /// Rewrite the whole file with the database's current contents.
    ///
    /// When the file already exists, `confirm` is asked first; answering
    /// `false` leaves the file untouched. The previous contents are lost once
    /// the save completes.
    pub fn save(
        &self,
        db: &Database,
        confirm: impl FnOnce(&Path) -> bool,
    ) -> Result<SaveOutcome, DatabaseError> {
        log::info!("Saving database at {}", self.path.display());
        if self.path.is_file() && !confirm(&self.path) {
            log::info!("Save declined, {} left untouched", self.path.display());
            return Ok(SaveOutcome::Declined);
        }
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let lines = self.write_to(db, file)?;
        log::info!("Wrote {} lines to {}", lines, self.path.display());
        Ok(SaveOutcome::Saved { lines })
    }

    /// Encode the database to any writer. Returns the number of lines written.
    ///
    /// The delimiter is stripped from every field and line breaks are folded
    /// to spaces so no record can spill into another column or line.
    pub fn write_to<W: Write>(&self, db: &Database, writer: W) -> Result<usize, DatabaseError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);

        writer.write_record(COLUMNS)?;
        let mut lines = 1;
        let delimiter = self.delimiter as char;
        for record in db.records() {
            let fields = record.to_fields().into_iter().map(|f| sanitize(&f, delimiter));
            writer.write_record(fields)?;
            lines += 1;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(lines)
    }

    fn io_error(&self, source: std::io::Error) -> DatabaseError {
        DatabaseError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// The header must name a known prefix of the column schema.
fn check_header(names: Vec<&str>) -> Result<(), DatabaseError> {
    if names.len() < MIN_COLUMNS || names.len() > COLUMNS.len() {
        return Err(DatabaseError::Format(format!(
            "header has {} columns, expected {} to {}",
            names.len(),
            MIN_COLUMNS,
            COLUMNS.len()
        )));
    }
    if let Some((i, name)) = names
        .iter()
        .enumerate()
        .find(|(i, name)| **name != COLUMNS[*i])
    {
        return Err(DatabaseError::Format(format!(
            "unexpected column {:?} at position {}, expected {:?}",
            name,
            i + 1,
            COLUMNS[i]
        )));
    }
    Ok(())
}

/// Characters the encoded fields cannot lose.
const RESERVED: &str = ",:\"{}[]/\\.-+_' ";

fn is_safe_delimiter(delimiter: char) -> bool {
    delimiter == '\t'
        || (delimiter.is_ascii()
            && !delimiter.is_ascii_alphanumeric()
            && !delimiter.is_ascii_control()
            && !RESERVED.contains(delimiter))
}

fn sanitize(field: &str, delimiter: char) -> String {
    field
        .chars()
        .filter(|c| *c != delimiter)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
