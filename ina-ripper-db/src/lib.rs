//! Flat-file persistence for the archive record database.
//!
//! The database is a tab-delimited text file: one header line naming the
//! columns, then one line per record. In memory it is an ordered mapping from
//! collection slug to the records of that collection, see [`Database`].

pub mod database;
pub mod store;

pub use database::{Collection, Database, IngestStats};
pub use store::{DatabaseError, DatabaseFile, SaveOutcome};
