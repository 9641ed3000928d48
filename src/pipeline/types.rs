//! Pipeline state and error types

use crate::convert::ConversionError;
use crate::fetch::{FetchError, TransportError};
use crate::observation::Observation;
use crate::record::PersistenceError;
use std::fmt;
use thiserror::Error;

/// Pipeline lifecycle
///
/// `Init -> Fetching -> Converting -> [AwaitingConfirmation] -> Persisting -> Done`.
/// `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Fetching,
    Converting,
    /// Observation built, waiting for the caller to confirm the save
    AwaitingConfirmation,
    Persisting,
    Done,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Fetching => "fetching",
            PipelineState::Converting => "converting",
            PipelineState::AwaitingConfirmation => "awaiting_confirmation",
            PipelineState::Persisting => "persisting",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Use fixed mock values instead of the network
    pub mock: bool,
    /// Persist without waiting for confirmation
    pub auto_save: bool,
}

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A price or rate could not be fetched; nothing was persisted
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Fetched values were rejected by conversion
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The observation was built but could not be fully persisted
    #[error("failed to persist observation: {source}")]
    Persistence {
        observation: Box<Observation>,
        #[source]
        source: PersistenceError,
    },

    /// `persist` called when there is no unsaved observation to persist
    #[error("cannot persist in state {state}")]
    InvalidState { state: PipelineState },

    /// HTTP client could not be constructed
    #[error("pipeline setup failed: {0}")]
    Setup(#[from] TransportError),
}

impl PipelineError {
    /// The unsaved observation, if the failure happened while persisting
    pub fn observation(&self) -> Option<&Observation> {
        match self {
            PipelineError::Persistence { observation, .. } => Some(observation),
            _ => None,
        }
    }
}
