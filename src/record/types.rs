//! Record store schema and persistence errors

use std::path::PathBuf;
use thiserror::Error;

/// Record store delimiter
pub const DELIMITER: u8 = b';';

/// Record store columns, in file order
pub const RECORD_COLUMNS: [&str; 9] = [
    "timestamp (UTC)",
    "gold_usd_per_ounce",
    "silver_usd_per_ounce",
    "gold_egp_per_ounce",
    "silver_egp_per_ounce",
    "gold_usd_per_gram",
    "silver_usd_per_gram",
    "gold_egp_per_gram",
    "silver_egp_per_gram",
];

/// How an existing header relates to [`RECORD_COLUMNS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCheck {
    /// No header yet (new or empty file)
    Missing,
    /// Same columns
    Current,
    /// Older file: header is a strict prefix of the current columns
    Older { columns: usize },
}

/// Persistence errors
///
/// The record store is written before the log store, so `LogStore` means the
/// record row for the same observation is already on disk.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Record store could not be read or written; nothing was persisted
    #[error("record store {path:?}: {source}")]
    RecordStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Log store could not be written
    #[error("log store {path:?}: {source}")]
    LogStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Record store header is not compatible with the current columns
    #[error("record store {path:?} has incompatible header: {found}")]
    SchemaMismatch { path: PathBuf, found: String },
}

impl PersistenceError {
    /// Whether the record row made it to disk before the failure
    pub fn record_written(&self) -> bool {
        matches!(self, PersistenceError::LogStore { .. })
    }
}
