//! Labeled time series of feature cells

use super::cell::{CellWeights, FeatureCell};
use super::distance::{sliding_offset_distance, warp_distance};

/// Default window width in seconds
pub const DEFAULT_WINDOW_SIZE: i64 = 120;

/// A named series of consecutive observation windows
///
/// A line is "positive" when it was derived from an announced trend and
/// "negative" when it was synthesized as a control; the tag is not stored
/// and is recovered through [`SeriesLine::is_trending`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    /// Trend name, possibly several whitespace-separated words
    pub name: String,

    /// UTC timestamp (seconds) of the first window
    pub start_timestamp: i64,

    /// Width of each window in seconds
    pub window_size: i64,

    /// Cells in window order
    pub cells: Vec<FeatureCell>,
}

impl SeriesLine {
    /// Create a line with explicit cells
    pub fn new(
        name: impl Into<String>,
        start_timestamp: i64,
        window_size: i64,
        cells: Vec<FeatureCell>,
    ) -> Self {
        Self {
            name: name.into(),
            start_timestamp,
            window_size,
            cells,
        }
    }

    /// Create a line of `len` empty cells sharing one label
    pub fn blank(
        name: impl Into<String>,
        start_timestamp: i64,
        window_size: i64,
        len: usize,
        is_trending: bool,
    ) -> Self {
        Self::new(
            name,
            start_timestamp,
            window_size,
            vec![FeatureCell::new(is_trending); len],
        )
    }

    /// Number of windows
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Exclusive end of the covered time range
    #[must_use]
    pub fn end_timestamp(&self) -> i64 {
        self.start_timestamp + self.window_size * self.cells.len() as i64
    }

    /// Whether `timestamp` falls in `[start_timestamp, end_timestamp)`
    #[must_use]
    pub fn covers(&self, timestamp: i64) -> bool {
        self.start_timestamp <= timestamp && timestamp < self.end_timestamp()
    }

    /// Index of the window containing `timestamp`, if covered
    #[must_use]
    pub fn window_index(&self, timestamp: i64) -> Option<usize> {
        if !self.covers(timestamp) {
            return None;
        }
        Some(((timestamp - self.start_timestamp) / self.window_size) as usize)
    }

    /// Prepend `count` unlabeled empty cells, moving the start back to match
    pub fn prepend_lead_in(&mut self, count: usize) {
        let mut cells = vec![FeatureCell::new(false); count];
        cells.append(&mut self.cells);
        self.cells = cells;
        self.start_timestamp -= self.window_size * count as i64;
    }

    /// Whether any word of the name appears as a token of the text
    ///
    /// This is a membership test over whitespace tokens, not a substring
    /// search.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.name
            .split_whitespace()
            .any(|word| tokens.iter().any(|token| token.as_ref() == word))
    }

    /// Convenience form of [`SeriesLine::matches`] that tokenizes raw text
    #[must_use]
    pub fn matches_text(&self, text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        self.matches(&tokens)
    }

    /// Whether the trend feed announced any window of this line
    #[must_use]
    pub fn is_trending(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_trending)
    }

    /// Sliding-offset distance to another line with unit weights
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.weighted_distance(other, &CellWeights::uniform())
    }

    /// Sliding-offset distance to another line
    #[must_use]
    pub fn weighted_distance(&self, other: &Self, weights: &CellWeights) -> f64 {
        sliding_offset_distance(&self.cells, &other.cells, weights)
    }

    /// Dynamic time warping distance to another line
    #[must_use]
    pub fn warp_distance(&self, other: &Self, weights: &CellWeights) -> f64 {
        warp_distance(&self.cells, &other.cells, weights)
    }
}
