//! The assembled experiment: every positive and negative line
//!
//! - [`TrendModel::normalize`] - per-line rescaling of the features
//! - [`TrendModel::matrix`] - dense feature tensor plus labels
//! - [`evaluate`] - leave-one-out nearest-neighbor evaluation
//! - [`persist`] - tree-shaped persisted representation
//! - [`export`] - NumPy files for external classifiers

pub mod evaluate;
pub mod export;
pub mod persist;

use ndarray::{Array1, Array3};
use thiserror::Error;

use crate::series::{FeatureCell, SeriesLine};

pub use evaluate::{Evaluation, NearestMatch, Outcome};
pub use export::{export_numpy, ExportMetadata, FEATURE_NAMES};
pub use persist::{CellRecord, LineRecord, ModelRecord, Persist};

/// Errors raised by model evaluation and reconstruction
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Need at least 2 lines to find neighbors, found {found}")]
    TooFewLines { found: usize },

    #[error("Need both classes, found {positives} positive and {negatives} negative lines")]
    MissingClass { positives: usize, negatives: usize },

    #[error("Malformed model: {reason}")]
    MalformedModel { reason: String },
}

/// Number of numeric features per cell
pub const FEATURE_COUNT: usize = 6;

/// Collection of all lines of one experiment
///
/// Line order carries no meaning but is kept stable so runs are
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendModel {
    pub lines: Vec<SeriesLine>,
}

/// Largest value of one field, 1 when the largest is 0
fn divisor(cells: &[FeatureCell], field: impl Fn(&FeatureCell) -> f64) -> f64 {
    let max = cells.iter().map(field).fold(f64::NEG_INFINITY, f64::max);
    if max == 0.0 || !max.is_finite() {
        1.0
    } else {
        max
    }
}

impl TrendModel {
    pub fn new(lines: Vec<SeriesLine>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines that trend at some window
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_trending()).count()
    }

    #[must_use]
    pub fn negative_count(&self) -> usize {
        self.len() - self.positive_count()
    }

    /// Length of the longest line
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines.iter().map(SeriesLine::len).max().unwrap_or(0)
    }

    /// Binary labels, 1 for lines that ever trend
    #[must_use]
    pub fn labels(&self) -> Vec<u8> {
        self.lines.iter().map(|l| u8::from(l.is_trending())).collect()
    }

    /// Rescale every line by its own per-field maxima
    ///
    /// `count`, `delta`, `delta_delta`, `avg_followers` and `avg_statuses`
    /// are divided by the line's largest value of that field (1 when the
    /// largest is 0). `retweet_rate` is already a ratio and is left as is.
    pub fn normalize(&mut self) {
        for line in &mut self.lines {
            let cells = &mut line.cells;
            let count = divisor(cells, |c| c.count);
            let delta = divisor(cells, |c| c.delta);
            let delta_delta = divisor(cells, |c| c.delta_delta);
            let followers = divisor(cells, |c| c.avg_followers);
            let statuses = divisor(cells, |c| c.avg_statuses);

            for cell in cells.iter_mut() {
                cell.count /= count;
                cell.delta /= delta;
                cell.delta_delta /= delta_delta;
                cell.avg_followers /= followers;
                cell.avg_statuses /= statuses;
            }
        }
        tracing::debug!(lines = self.lines.len(), "Normalized model");
    }

    /// Dense `(lines, width, 6)` feature tensor and the line labels
    ///
    /// Shorter lines are zero-padded at the end. Features are ordered as in
    /// [`FeatureCell::features`].
    #[must_use]
    pub fn matrix(&self) -> (Array3<f64>, Array1<u8>) {
        let mut features = Array3::<f64>::zeros((self.len(), self.width(), FEATURE_COUNT));
        for (i, line) in self.lines.iter().enumerate() {
            for (j, cell) in line.cells.iter().enumerate() {
                for (k, value) in cell.features().into_iter().enumerate() {
                    features[[i, j, k]] = value;
                }
            }
        }
        (features, Array1::from_vec(self.labels()))
    }
}
