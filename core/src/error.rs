use crate::types::{Quarter, Year};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No data available: {context}")]
    EmptyResult { context: String },

    #[error("Period {year} Q{quarter} is not present in the source data")]
    InvalidPeriod { year: Year, quarter: Quarter },

    #[error("State '{name}' has no geometry mapping")]
    UnknownState { name: String },

    #[error("Unknown business case id {id} (expected 1..=5)")]
    UnknownCase { id: u8 },

    #[error("Column '{name}' not present in result set")]
    MissingColumn { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PulseError {
    pub fn empty(context: impl Into<String>) -> Self {
        PulseError::EmptyResult {
            context: context.into(),
        }
    }

    /// True for the "query came back with nothing to plot" case, which a
    /// business-case run converts into a visible notice instead of an abort.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, PulseError::EmptyResult { .. })
    }
}

pub type PulseResult<T> = Result<T, PulseError>;
