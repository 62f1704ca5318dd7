//! Readers for the external inputs of the pipeline
//!
//! - [`trends`] - announced trending topics and the windows they trended in
//! - [`records`] - the raw tweet stream, one JSON object per line
//! - [`vocabulary`] - stopwords and the word-frequency model used to name
//!   negative series

pub mod records;
pub mod trends;
pub mod vocabulary;

use thiserror::Error;

pub use records::{Record, RecordStream, CREATED_AT_FORMAT};
pub use trends::{read_trend_feed, TrendTimeline, AS_OF_FORMAT};
pub use vocabulary::{NameSampling, Stopwords, WordFrequency};

/// Errors raised while decoding an input file
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON on line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: usize, value: String },

    #[error("Window size must be positive, got {value}")]
    InvalidWindowSize { value: i64 },
}

impl FeedError {
    /// Line of the input the error refers to, if any
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Read { line, .. }
            | Self::MalformedLine { line, .. }
            | Self::InvalidTimestamp { line, .. } => Some(*line),
            Self::InvalidWindowSize { .. } => None,
        }
    }
}

/// Result type for feed decoding
pub type FeedResult<T> = Result<T, FeedError>;
