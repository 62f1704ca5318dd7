//! twittp - Twitter trend time-series experiments
//!
//! Builds per-topic time series from a trending-topics feed and a tweet
//! stream, pairs them with control series for words that never trended,
//! and checks how well nearest-neighbor matching separates the two.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`series`] - Feature cells, series lines and the distances between them
//! - [`feed`] - Decoding of the trend feed, the tweet stream and the stopword list
//! - [`pipeline`] - Positive lines, negative lines, population
//! - [`model`] - Normalization, leave-one-out evaluation, persistence, export
//! - [`config`] - Configuration management and settings
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use twittp::config::Config;
//! use twittp::pipeline::ModelBuilder;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let builder = ModelBuilder::new(config.pipeline.clone())?;
//!     let (mut model, _report) = builder.build_from_files(
//!         Path::new("trends.txt"),
//!         Path::new("tweets.json"),
//!         Path::new("stopwords.txt"),
//!     )?;
//!     let evaluation = model.leave_one_out(&config.distance.weights)?;
//!     println!("precision: {:?}", evaluation.precision());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod pipeline;
pub mod series;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::feed::{Record, RecordStream, Stopwords, TrendTimeline, WordFrequency};
    pub use crate::model::{Evaluation, Outcome, TrendModel};
    pub use crate::pipeline::{BuildReport, ModelBuilder};
    pub use crate::series::{CellWeights, FeatureCell, SeriesLine};
}
