//! Leave-one-out nearest-neighbor evaluation
//!
//! Every line is matched to its nearest other line under the warp
//! distance; the match's label is the prediction. The counts of the four
//! outcomes give precision and recall for the "trending" class.

use ndarray::Array2;
use serde::Serialize;

use super::{ModelError, TrendModel};
use crate::series::{warp_distance, CellWeights};

/// Classification outcome of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TruePositive,
    FalseNegative,
    FalsePositive,
    TrueNegative,
}

impl Outcome {
    /// Outcome for a line with label `actual` whose neighbor has label `predicted`
    #[must_use]
    pub fn of(actual: bool, predicted: bool) -> Self {
        match (actual, predicted) {
            (true, true) => Self::TruePositive,
            (true, false) => Self::FalseNegative,
            (false, true) => Self::FalsePositive,
            (false, false) => Self::TrueNegative,
        }
    }
}

/// Nearest other line of one line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestMatch {
    pub index: usize,
    pub nearest: usize,
    pub distance: f64,
    pub outcome: Outcome,
}

/// Result of a leave-one-out run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub true_positives: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,

    /// One entry per line, in model order
    pub matches: Vec<NearestMatch>,
}

impl Evaluation {
    fn record(&mut self, entry: NearestMatch) {
        match entry.outcome {
            Outcome::TruePositive => self.true_positives += 1,
            Outcome::FalseNegative => self.false_negatives += 1,
            Outcome::FalsePositive => self.false_positives += 1,
            Outcome::TrueNegative => self.true_negatives += 1,
        }
        self.matches.push(entry);
    }

    /// `TP / (TP + FP)`, `None` when no line was matched to a positive
    #[must_use]
    pub fn precision(&self) -> Option<f64> {
        let denominator = self.true_positives + self.false_positives;
        (denominator > 0).then(|| self.true_positives as f64 / denominator as f64)
    }

    /// `TP / (TP + FN)`, `None` when there is no positive line
    #[must_use]
    pub fn recall(&self) -> Option<f64> {
        let denominator = self.true_positives + self.false_negatives;
        (denominator > 0).then(|| self.true_positives as f64 / denominator as f64)
    }

    /// Indices of lines with the given outcome
    #[must_use]
    pub fn indices(&self, outcome: Outcome) -> Vec<usize> {
        self.matches
            .iter()
            .filter(|m| m.outcome == outcome)
            .map(|m| m.index)
            .collect()
    }
}

impl TrendModel {
    /// Symmetric matrix of warp distances between all lines
    ///
    /// Each unordered pair is computed once; the diagonal is 0.
    #[must_use]
    pub fn pairwise_distances(&self, weights: &CellWeights) -> Array2<f64> {
        let n = self.lines.len();
        let mut distances = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let d = warp_distance(&self.lines[i].cells, &self.lines[j].cells, weights);
                distances[[i, j]] = d;
                distances[[j, i]] = d;
            }
        }
        distances
    }

    /// Classify every line by its nearest neighbor without normalizing
    ///
    /// Ties go to the lowest index.
    pub fn classify(&self, weights: &CellWeights) -> Result<Evaluation, ModelError> {
        let n = self.lines.len();
        if n < 2 {
            return Err(ModelError::TooFewLines { found: n });
        }
        let positives = self.positive_count();
        if positives == 0 || positives == n {
            return Err(ModelError::MissingClass {
                positives,
                negatives: n - positives,
            });
        }

        let labels: Vec<bool> = self.lines.iter().map(|l| l.is_trending()).collect();
        let distances = self.pairwise_distances(weights);
        let mut evaluation = Evaluation::default();

        for i in 0..n {
            let mut best: Option<(usize, f64)> = None;
            for j in (0..n).filter(|&j| j != i) {
                let d = distances[[i, j]];
                if best.map_or(true, |(_, min)| d < min) {
                    best = Some((j, d));
                }
            }
            // n >= 2 guarantees a neighbor
            let Some((nearest, distance)) = best else {
                continue;
            };

            let outcome = Outcome::of(labels[i], labels[nearest]);
            match outcome {
                Outcome::FalseNegative => {
                    tracing::info!(index = i, nearest, distance, "False negative")
                }
                Outcome::FalsePositive => {
                    tracing::info!(index = i, nearest, distance, "False positive")
                }
                _ => {}
            }
            evaluation.record(NearestMatch {
                index: i,
                nearest,
                distance,
                outcome,
            });
        }

        tracing::info!(
            true_positives = evaluation.true_positives,
            false_negatives = evaluation.false_negatives,
            false_positives = evaluation.false_positives,
            true_negatives = evaluation.true_negatives,
            "Leave-one-out evaluation complete"
        );
        Ok(evaluation)
    }

    /// Normalize the model, then run leave-one-out classification
    pub fn leave_one_out(&mut self, weights: &CellWeights) -> Result<Evaluation, ModelError> {
        self.normalize();
        self.classify(weights)
    }
}
