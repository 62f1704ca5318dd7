//! Per-window feature cell and its distance

use serde::{Deserialize, Serialize};

/// Per-field multipliers applied inside the cell distance
///
/// Every weight defaults to 1.0, which makes the weighted distance the plain
/// sum of squared differences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellWeights {
    pub count: f64,
    pub delta: f64,
    pub delta_delta: f64,
    pub avg_followers: f64,
    pub avg_statuses: f64,
    pub retweet_rate: f64,
}

impl Default for CellWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl CellWeights {
    /// All weights set to 1.0
    #[must_use]
    pub const fn uniform() -> Self {
        Self {
            count: 1.0,
            delta: 1.0,
            delta_delta: 1.0,
            avg_followers: 1.0,
            avg_statuses: 1.0,
            retweet_rate: 1.0,
        }
    }

    /// Check that every weight is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [
            self.count,
            self.delta,
            self.delta_delta,
            self.avg_followers,
            self.avg_statuses,
            self.retweet_rate,
        ]
        .iter()
        .all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// One observation window of a series
///
/// Cells start out zeroed when a series is created; the populator fills
/// them in place and normalization rescales them afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureCell {
    /// Whether the trend feed announced this window as trending
    pub is_trending: bool,

    /// Number of matching records in the window
    pub count: f64,

    /// Count difference from the previous window
    pub delta: f64,

    /// Delta difference from the previous window
    pub delta_delta: f64,

    /// Mean follower count of matching authors
    pub avg_followers: f64,

    /// Mean status count of matching authors
    pub avg_statuses: f64,

    /// Share of matching records that were retweets
    pub retweet_rate: f64,
}

impl FeatureCell {
    /// Create an empty cell carrying only its label
    #[must_use]
    pub fn new(is_trending: bool) -> Self {
        Self {
            is_trending,
            ..Default::default()
        }
    }

    /// The six numeric features in export order
    #[must_use]
    pub fn features(&self) -> [f64; 6] {
        [
            self.count,
            self.delta,
            self.delta_delta,
            self.avg_followers,
            self.avg_statuses,
            self.retweet_rate,
        ]
    }

    /// Sum of squared differences over the six numeric features
    ///
    /// Labels are ignored.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.weighted_distance(other, &CellWeights::uniform())
    }

    /// Weighted sum of squared differences over the six numeric features
    #[must_use]
    pub fn weighted_distance(&self, other: &Self, weights: &CellWeights) -> f64 {
        weights.count * (self.count - other.count).powi(2)
            + weights.delta * (self.delta - other.delta).powi(2)
            + weights.delta_delta * (self.delta_delta - other.delta_delta).powi(2)
            + weights.avg_followers * (self.avg_followers - other.avg_followers).powi(2)
            + weights.avg_statuses * (self.avg_statuses - other.avg_statuses).powi(2)
            + weights.retweet_rate * (self.retweet_rate - other.retweet_rate).powi(2)
    }
}
