//! Append-only recorder for observations

use super::format::{failure_line, log_line, record_fields};
use super::types::{HeaderCheck, PersistenceError, DELIMITER, RECORD_COLUMNS};
use crate::observation::Observation;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Default record store path
pub const DEFAULT_RECORD_PATH: &str = "prices_log.csv";
/// Default log store path
pub const DEFAULT_LOG_PATH: &str = "prices.log";

/// Configuration for the recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Semicolon-delimited record store
    pub record_path: PathBuf,
    /// Human-readable log store
    pub log_path: PathBuf,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

/// Appends observations to the record store and the log store
///
/// Files are opened for each write and closed before the call returns.
/// Existing rows are never rewritten.
#[derive(Debug, Clone)]
pub struct Recorder {
    config: RecorderConfig,
}

impl Recorder {
    /// Create a new recorder
    pub fn new(config: RecorderConfig) -> Self {
        Self { config }
    }

    /// Create a recorder for the given store paths
    pub fn with_paths(record_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self::new(RecorderConfig {
            record_path: record_path.into(),
            log_path: log_path.into(),
        })
    }

    /// Get the record store path
    pub fn record_path(&self) -> &Path {
        &self.config.record_path
    }

    /// Get the log store path
    pub fn log_path(&self) -> &Path {
        &self.config.log_path
    }

    /// Persist one observation: a record row, then a log line
    pub fn record(&self, obs: &Observation) -> Result<(), PersistenceError> {
        self.append_record(obs)?;
        self.append_log(obs)?;

        tracing::info!(
            record_path = ?self.config.record_path,
            log_path = ?self.config.log_path,
            timestamp = %obs.timestamp_iso(),
            "Observation recorded"
        );
        Ok(())
    }

    /// Append a row to the record store, writing the header first if needed
    pub fn append_record(&self, obs: &Observation) -> Result<(), PersistenceError> {
        let path = &self.config.record_path;
        let store_err = |source: io::Error| PersistenceError::RecordStore {
            path: path.clone(),
            source,
        };

        let header = self.check_header()?;
        ensure_parent(path).map_err(store_err)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(store_err)?;
        terminate_partial_line(path, &mut file).map_err(store_err)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(file);

        match header {
            HeaderCheck::Missing => {
                writer
                    .write_record(RECORD_COLUMNS)
                    .map_err(|e| store_err(e.into()))?;
                tracing::info!(path = ?path, "Created record store");
            }
            HeaderCheck::Older { columns } => {
                tracing::warn!(
                    path = ?path,
                    columns,
                    current = RECORD_COLUMNS.len(),
                    "Record store has an older header; appending full-width rows"
                );
            }
            HeaderCheck::Current => {}
        }

        writer
            .write_record(&record_fields(obs))
            .map_err(|e| store_err(e.into()))?;
        writer.flush().map_err(store_err)?;

        tracing::debug!(path = ?path, "Appended record row");
        Ok(())
    }

    /// Append a summary line to the log store
    pub fn append_log(&self, obs: &Observation) -> Result<(), PersistenceError> {
        self.append_log_line(&log_line(obs))
    }

    /// Append an error line for a failed run to the log store
    pub fn record_failure(
        &self,
        at: DateTime<Utc>,
        error: &dyn Display,
    ) -> Result<(), PersistenceError> {
        self.append_log_line(&failure_line(at, error))
    }

    /// Compare the record store's header with the current columns
    pub fn check_header(&self) -> Result<HeaderCheck, PersistenceError> {
        let path = &self.config.record_path;
        let line = read_first_line(path).map_err(|source| PersistenceError::RecordStore {
            path: path.clone(),
            source,
        })?;

        let Some(line) = line else {
            return Ok(HeaderCheck::Missing);
        };

        let found: Vec<&str> = line.split(DELIMITER as char).map(str::trim).collect();
        if found == RECORD_COLUMNS {
            Ok(HeaderCheck::Current)
        } else if found.len() < RECORD_COLUMNS.len() && found == RECORD_COLUMNS[..found.len()] {
            Ok(HeaderCheck::Older {
                columns: found.len(),
            })
        } else {
            Err(PersistenceError::SchemaMismatch {
                path: path.clone(),
                found: line,
            })
        }
    }

    fn append_log_line(&self, line: &str) -> Result<(), PersistenceError> {
        let path = &self.config.log_path;
        let log_err = |source: io::Error| PersistenceError::LogStore {
            path: path.clone(),
            source,
        };

        ensure_parent(path).map_err(log_err)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(log_err)?;
        terminate_partial_line(path, &mut file).map_err(log_err)?;
        writeln!(file, "{}", line).map_err(log_err)?;

        Ok(())
    }
}

/// Ensure the parent directory of a store exists
fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// Whether a non-empty file's last byte is something other than `\n`
fn ends_mid_line(path: &Path) -> io::Result<bool> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Close off a truncated last line so the next append starts a new one
fn terminate_partial_line(path: &Path, file: &mut File) -> io::Result<()> {
    if ends_mid_line(path)? {
        tracing::warn!(path = ?path, "Store ends mid-line; terminating it before appending");
        file.write_all(b"\n")?;
    }
    Ok(())
}

/// First line of a file without its terminator; `None` if absent or empty
fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut line = String::new();
    BufReader::new(file).read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
