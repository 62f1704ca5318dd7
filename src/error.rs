//! Unified error handling for the twittp crate
//!
//! Each domain keeps its own error enum ([`FeedError`], [`PipelineError`],
//! [`ModelError`]); this module wraps them into a single [`Error`] so that
//! the pipeline phases can be chained with `?`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use twittp::error::{Error, ErrorCategory};
//!
//! fn report(err: &Error) {
//!     if err.category() == ErrorCategory::Input {
//!         eprintln!("Check the input files: {err}");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::feed::FeedError;
pub use crate::model::ModelError;
pub use crate::pipeline::PipelineError;

/// Classification of errors for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or unreadable input files
    Input,
    /// Persisted model could not be decoded
    Parsing,
    /// Writing or reading model and export files
    Storage,
    /// Unusable settings
    Config,
    /// Model is not fit for evaluation or generation
    Evaluation,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Evaluation => "evaluation",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for the twittp crate
#[derive(Error, Debug)]
pub enum Error {
    /// Trend feed, record stream or stopword decoding errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Model construction errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Model evaluation and reconstruction errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// NumPy export errors
    #[error("NumPy export error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),
}

impl Error {
    /// Get the error category for reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Feed(e) => match e {
                FeedError::InvalidWindowSize { .. } => ErrorCategory::Config,
                _ => ErrorCategory::Input,
            },
            Self::Pipeline(e) => match e {
                PipelineError::InvalidConfig { .. } => ErrorCategory::Config,
                _ => ErrorCategory::Evaluation,
            },
            Self::Model(e) => match e {
                ModelError::MalformedModel { .. } => ErrorCategory::Parsing,
                _ => ErrorCategory::Evaluation,
            },
            Self::Io(_) | Self::Npy(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
