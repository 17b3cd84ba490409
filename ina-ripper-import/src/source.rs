//! External data sources consumed by the enrichment pass.
//!
//! The live sources (catalog detail pages, video platform search) are
//! implemented outside this workspace. The JSON-backed sources replay
//! pre-fetched dumps so a database can be enriched offline.

use std::collections::HashMap;
use std::path::Path;

use ina_ripper_match::RawCandidate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("No search results recorded for '{0}'")]
    NotRecorded(String),
    #[error("Remote source error: {0}")]
    Remote(String),
}

/// Provides the raw credits text of a catalog detail page.
pub trait CreditsSource {
    /// `Ok(None)` when the page has no credits section.
    fn fetch_credits(&self, link: &str) -> Result<Option<String>, SourceError>;
}

/// Searches the video platform. Results come back in no particular order.
pub trait CandidateSource {
    fn search(&self, query: &str) -> Result<Vec<RawCandidate>, SourceError>;
}

/// Search results replayed from a JSON object mapping each query string to
/// its list of `{"id", "title", "duration_seconds"}` results.
#[derive(Debug, Default)]
pub struct JsonCandidateSource {
    results: HashMap<String, Vec<RawCandidate>>,
}

impl JsonCandidateSource {
    pub fn new(results: HashMap<String, Vec<RawCandidate>>) -> Self {
        Self { results }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        Ok(Self::new(read_json(path)?))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl CandidateSource for JsonCandidateSource {
    fn search(&self, query: &str) -> Result<Vec<RawCandidate>, SourceError> {
        self.results
            .get(query)
            .cloned()
            .ok_or_else(|| SourceError::NotRecorded(query.to_string()))
    }
}

/// Credits texts replayed from a JSON object mapping detail-page links to
/// their credits text. Unknown links have no credits.
#[derive(Debug, Default)]
pub struct JsonCreditsSource {
    pages: HashMap<String, String>,
}

impl JsonCreditsSource {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self { pages }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        Ok(Self::new(read_json(path)?))
    }
}

impl CreditsSource for JsonCreditsSource {
    fn fetch_credits(&self, link: &str) -> Result<Option<String>, SourceError> {
        Ok(self.pages.get(link).cloned())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SourceError::Json {
        path: path.display().to_string(),
        source,
    })
}
