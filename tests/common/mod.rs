//! Common test utilities

use twittp::feed::Record;
use twittp::series::{FeatureCell, SeriesLine};

/// Window width used by the helpers
pub const WINDOW: i64 = 120;

/// Cell with every numeric feature set from one tuple
pub fn cell(values: (f64, f64, f64, f64, f64, f64)) -> FeatureCell {
    let (count, delta, delta_delta, avg_followers, avg_statuses, retweet_rate) = values;
    FeatureCell {
        is_trending: false,
        count,
        delta,
        delta_delta,
        avg_followers,
        avg_statuses,
        retweet_rate,
    }
}

/// Line built from explicit cells, starting at 0
pub fn line_with_cells(name: &str, cells: Vec<FeatureCell>) -> SeriesLine {
    SeriesLine::new(name, 0, WINDOW, cells)
}

/// Record carrying author statistics
pub fn record(text: &str, timestamp: i64, followers: u64, statuses: u64, retweeted: bool) -> Record {
    Record {
        followers,
        statuses,
        retweeted,
        ..Record::new(text, timestamp)
    }
}
