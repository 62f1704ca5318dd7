//! Trend feed decoding
//!
//! Each input line is one snapshot of the trending endpoint:
//!
//! ```json
//! {"as_of": "2012-03-01T18:04:11Z", "trends": [{"name": "#rust"}, {"name": "Leap Day"}]}
//! ```
//!
//! A snapshot credits its topics to every window between the previous
//! snapshot and its own timestamp, so sparse polling still yields a
//! contiguous window history.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{FeedError, FeedResult};

/// Format of the `as_of` field
pub const AS_OF_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Deserialize)]
struct Snapshot {
    as_of: Option<String>,
    #[serde(default)]
    trends: Vec<Topic>,
}

#[derive(Debug, Deserialize)]
struct Topic {
    name: String,
}

/// A topic name and the window starts in which it was trending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendTimeline {
    pub name: String,

    /// Window start timestamps in ascending order
    pub timestamps: Vec<i64>,

    /// Window width shared by the whole feed
    pub window_size: i64,
}

impl TrendTimeline {
    pub fn new(name: impl Into<String>, timestamps: Vec<i64>, window_size: i64) -> Self {
        Self {
            name: name.into(),
            timestamps,
            window_size,
        }
    }

    /// Longest run of windows exactly `window_size` apart
    ///
    /// Returns `(start, length)`. The earliest run wins ties; an empty
    /// timeline yields `None`.
    #[must_use]
    pub fn longest_run(&self) -> Option<(i64, usize)> {
        let mut timestamps = self.timestamps.iter().copied();
        let first = timestamps.next()?;

        let mut best = (first, 1);
        let mut current = (first, 1);
        let mut last = first;

        for ts in timestamps {
            if ts == last + self.window_size {
                current.1 += 1;
            } else {
                current = (ts, 1);
            }
            if current.1 > best.1 {
                best = current;
            }
            last = ts;
        }

        Some(best)
    }
}

fn parse_as_of(value: &str, line: usize) -> FeedResult<i64> {
    NaiveDateTime::parse_from_str(value, AS_OF_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| FeedError::InvalidTimestamp {
            line,
            value: value.to_string(),
        })
}

/// Decode a trend feed into per-topic window timelines
///
/// Topics are returned in order of first appearance. Snapshots without an
/// `as_of` field are skipped; blank lines are ignored. A non-positive
/// `window_size` is rejected before any input is read.
pub fn read_trend_feed<R: BufRead>(reader: R, window_size: i64) -> FeedResult<Vec<TrendTimeline>> {
    if window_size <= 0 {
        return Err(FeedError::InvalidWindowSize { value: window_size });
    }

    let mut timelines: Vec<TrendTimeline> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut cursor: Option<i64> = None;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|source| FeedError::Read {
            line: line_no,
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let snapshot: Snapshot =
            serde_json::from_str(line).map_err(|source| FeedError::MalformedLine {
                line: line_no,
                source,
            })?;
        let Some(as_of) = snapshot.as_of.as_deref() else {
            continue;
        };
        let ts = parse_as_of(as_of, line_no)?;

        let cursor = cursor.get_or_insert(ts - ts.rem_euclid(window_size));
        while ts > *cursor {
            let window = *cursor;
            for topic in &snapshot.trends {
                let slot = *index.entry(topic.name.clone()).or_insert_with(|| {
                    timelines.push(TrendTimeline::new(topic.name.clone(), Vec::new(), window_size));
                    timelines.len() - 1
                });
                let timestamps = &mut timelines[slot].timestamps;
                if timestamps.last() != Some(&window) {
                    timestamps.push(window);
                }
            }
            *cursor += window_size;
        }
    }

    tracing::debug!(topics = timelines.len(), "Decoded trend feed");
    Ok(timelines)
}

/// Read a trend feed file
pub fn read_trend_file(path: &Path, window_size: i64) -> crate::error::Result<Vec<TrendTimeline>> {
    let file = File::open(path)?;
    Ok(read_trend_feed(BufReader::new(file), window_size)?)
}
