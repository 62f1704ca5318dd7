//! Model construction pipeline
//!
//! The phases run strictly in order:
//!
//! 1. [`positive`] - longest announced run per topic, short runs dropped,
//!    lead-in windows prepended
//! 2. [`negative`] - control lines shaped like the positives
//! 3. [`populate`] - one streaming pass over the records, then per-line
//!    averages and differences
//! 4. normalization of every line to its own maxima
//!
//! [`ModelBuilder`] chains them.

pub mod negative;
pub mod populate;
pub mod positive;

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::feed::{self, FeedResult, Record, Stopwords, TrendTimeline, WordFrequency};
use crate::model::TrendModel;

pub use negative::{LengthProfile, NegativeSeriesGenerator};
pub use populate::{finalize_cells, populate, PopulationStats, SeriesPopulator};
pub use positive::{positive_line, positive_lines};

/// Errors raised while assembling a model
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No positive trend reached the minimum length of {minimum_len} windows")]
    NoPositiveLines { minimum_len: usize },

    #[error("Vocabulary exhausted: needed {requested} negative names, found {available}")]
    VocabularyExhausted { requested: usize, available: usize },

    #[error("Invalid pipeline setting {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}

/// What a build produced
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub positive_lines: usize,
    pub negative_lines: usize,
    pub positive_profile: Option<LengthProfile>,
    pub negative_profile: Option<LengthProfile>,
    pub population: PopulationStats,
}

/// Runs the construction phases with one configuration
pub struct ModelBuilder {
    config: PipelineConfig,
}

impl ModelBuilder {
    /// Create a builder, rejecting unusable settings
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        if config.window_size <= 0 {
            return Err(PipelineError::InvalidConfig {
                field: "window_size".to_string(),
                reason: format!("must be positive, got {}", config.window_size),
            });
        }
        Ok(Self { config })
    }

    /// Build a normalized model from decoded inputs
    pub fn build<I>(
        &self,
        timelines: &[TrendTimeline],
        vocabulary: &WordFrequency,
        records: I,
    ) -> crate::error::Result<(TrendModel, BuildReport)>
    where
        I: IntoIterator<Item = FeedResult<Record>>,
    {
        let positives = positive_lines(
            timelines,
            self.config.minimum_trend_size,
            self.config.lead_in_windows,
        );
        if positives.is_empty() {
            return Err(PipelineError::NoPositiveLines {
                minimum_len: self.config.minimum_trend_size,
            }
            .into());
        }

        let mut generator = NegativeSeriesGenerator::new(
            self.config.window_size,
            self.config.name_sampling,
            self.config.seed,
        );
        let negatives = generator.generate(&positives, vocabulary)?;

        let positive_profile = LengthProfile::of(&positives);
        let negative_profile = LengthProfile::of(&negatives);
        let positive_count = positives.len();
        let negative_count = negatives.len();

        let mut lines = positives;
        lines.extend(negatives);
        let population = populate(&mut lines, records)?;

        let mut model = TrendModel::new(lines);
        model.normalize();

        let report = BuildReport {
            positive_lines: positive_count,
            negative_lines: negative_count,
            positive_profile,
            negative_profile,
            population,
        };
        Ok((model, report))
    }

    /// Build a normalized model from the three input files
    ///
    /// The tweet file is streamed twice: once for the word-frequency model
    /// and once for population.
    pub fn build_from_files(
        &self,
        trends: &Path,
        tweets: &Path,
        stopwords: &Path,
    ) -> crate::error::Result<(TrendModel, BuildReport)> {
        let timelines = feed::trends::read_trend_file(trends, self.config.window_size)?;
        let stopwords = Stopwords::from_file(stopwords)?;
        let vocabulary = WordFrequency::from_file(tweets, &stopwords)?;
        tracing::info!(
            topics = timelines.len(),
            stopwords = stopwords.len(),
            words = vocabulary.len(),
            "Loaded inputs"
        );

        let records = feed::RecordStream::open(tweets)?;
        self.build(&timelines, &vocabulary, records)
    }
}
