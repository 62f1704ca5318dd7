//! Synthetic non-trending control series
//!
//! Negative lines copy the statistical shape of the positive set: the same
//! number of lines, lengths drawn from the positive lengths, and start times
//! inside the time span the positives cover. Names come from the
//! word-frequency model and never collide with a positive name.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashSet;

use super::PipelineError;
use crate::feed::{NameSampling, WordFrequency};
use crate::series::SeriesLine;

/// Summary of the length distribution of a set of lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthProfile {
    pub lines: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: usize,
    pub max: usize,
}

impl LengthProfile {
    /// Profile the lengths of `lines`, `None` when there are none
    pub fn of(lines: &[SeriesLine]) -> Option<Self> {
        use statrs::statistics::Statistics;

        let lengths: Vec<f64> = lines.iter().map(|l| l.len() as f64).collect();
        if lengths.is_empty() {
            return None;
        }
        let mean = lengths.iter().mean();
        let std_dev = if lengths.len() < 2 {
            0.0
        } else {
            lengths.iter().std_dev()
        };

        Some(Self {
            lines: lines.len(),
            mean,
            std_dev,
            min: lines.iter().map(SeriesLine::len).fold(usize::MAX, usize::min),
            max: lines.iter().map(SeriesLine::len).fold(0, usize::max),
        })
    }
}

/// Builds negative lines shaped like a positive set
pub struct NegativeSeriesGenerator {
    window_size: i64,
    sampling: NameSampling,
    rng: ChaCha8Rng,
}

impl NegativeSeriesGenerator {
    /// Create a generator with a deterministic seed
    pub fn new(window_size: i64, sampling: NameSampling, seed: u64) -> Self {
        Self {
            window_size,
            sampling,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// One empty unlabeled line of a sampled length placed inside `[start, end)`
    fn random_line(&mut self, name: String, start: i64, end: i64, lengths: &[usize]) -> SeriesLine {
        let len = lengths[self.rng.gen_range(0..lengths.len())];
        let first = start.div_euclid(self.window_size);
        let last = (end.div_euclid(self.window_size) - len as i64).max(first);
        let window = self.rng.gen_range(first..=last);

        SeriesLine::blank(name, window * self.window_size, self.window_size, len, false)
    }

    /// Generate one negative line per positive line
    ///
    /// An empty positive set yields no negatives.
    pub fn generate(
        &mut self,
        positives: &[SeriesLine],
        vocabulary: &WordFrequency,
    ) -> Result<Vec<SeriesLine>, PipelineError> {
        if positives.is_empty() {
            tracing::warn!("No positive lines, skipping negative generation");
            return Ok(Vec::new());
        }

        let start = positives.iter().map(|l| l.start_timestamp).min().unwrap_or(0);
        let end = positives.iter().map(SeriesLine::end_timestamp).max().unwrap_or(start);
        let lengths: Vec<usize> = positives.iter().map(SeriesLine::len).collect();

        let exclude: HashSet<&str> = positives.iter().map(|l| l.name.as_str()).collect();
        let names = vocabulary.candidate_names(positives.len(), &exclude, self.sampling, &mut self.rng);
        if names.len() < positives.len() {
            return Err(PipelineError::VocabularyExhausted {
                requested: positives.len(),
                available: names.len(),
            });
        }

        let negatives: Vec<SeriesLine> = names
            .into_iter()
            .map(|name| self.random_line(name, start, end, &lengths))
            .collect();

        if let (Some(pos), Some(neg)) = (LengthProfile::of(positives), LengthProfile::of(&negatives)) {
            tracing::info!(
                sampling = %self.sampling,
                positive_mean = pos.mean,
                positive_std = pos.std_dev,
                negative_mean = neg.mean,
                negative_std = neg.std_dev,
                "Generated negative lines"
            );
        }

        Ok(negatives)
    }
}
