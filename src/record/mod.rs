//! Observation persistence
//!
//! Appends observations to a semicolon-delimited record store and a
//! human-readable log store.

mod format;
mod recorder;
mod types;

pub use format::{cents, failure_line, log_line, record_fields};
pub use recorder::{Recorder, RecorderConfig, DEFAULT_LOG_PATH, DEFAULT_RECORD_PATH};
pub use types::{HeaderCheck, PersistenceError, DELIMITER, RECORD_COLUMNS};
