//! Two-pass aggregation of the record stream into series cells
//!
//! The first pass walks the record stream once and accumulates raw totals
//! into every line whose time range covers the record and whose name
//! matches its text. The second pass runs per line: totals become averages
//! and the first and second count differences are derived.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::feed::{FeedResult, Record};
use crate::series::{FeatureCell, SeriesLine};

/// Counters gathered while populating
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Records decoded from the stream
    pub records_read: usize,

    /// Records that updated at least one line
    pub records_attributed: usize,

    /// Total (record, line) updates
    pub cell_updates: usize,

    /// Lines that received at least one record
    pub lines_touched: usize,

    /// Wall time of both passes in milliseconds
    pub duration_ms: u64,
}

impl PopulationStats {
    /// Share of records attributed to some line, as a percentage
    pub fn attribution_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.records_attributed as f64 / self.records_read as f64) * 100.0
        }
    }
}

/// Fills existing lines from a record stream
pub struct SeriesPopulator<'a> {
    lines: &'a mut [SeriesLine],
    ends: Vec<i64>,
    touched: Vec<bool>,
    stats: PopulationStats,
    started: Instant,
}

impl<'a> SeriesPopulator<'a> {
    pub fn new(lines: &'a mut [SeriesLine]) -> Self {
        let ends = lines.iter().map(SeriesLine::end_timestamp).collect();
        let touched = vec![false; lines.len()];
        Self {
            lines,
            ends,
            touched,
            stats: PopulationStats::default(),
            started: Instant::now(),
        }
    }

    /// First pass: add one record's raw totals to every matching window
    pub fn accumulate(&mut self, record: &Record) {
        self.stats.records_read += 1;
        let tokens = record.tokens();
        let mut attributed = false;

        for ((line, end), touched) in self.lines.iter_mut().zip(&self.ends).zip(&mut self.touched) {
            if record.timestamp < line.start_timestamp || record.timestamp >= *end {
                continue;
            }
            if !line.matches(&tokens) {
                continue;
            }

            let offset = ((record.timestamp - line.start_timestamp) / line.window_size) as usize;
            let cell = &mut line.cells[offset];
            cell.count += 1.0;
            cell.avg_followers += record.followers as f64;
            cell.avg_statuses += record.statuses as f64;
            if record.retweeted {
                cell.retweet_rate += 1.0;
            }

            self.stats.cell_updates += 1;
            *touched = true;
            attributed = true;
        }

        if attributed {
            self.stats.records_attributed += 1;
        }
    }

    /// Second pass: turn totals into averages and derive differences
    pub fn finish(mut self) -> PopulationStats {
        for line in self.lines.iter_mut() {
            finalize_cells(&mut line.cells);
        }
        self.stats.lines_touched = self.touched.iter().filter(|t| **t).count();
        self.stats.duration_ms = self.started.elapsed().as_millis() as u64;
        self.stats
    }
}

/// Average the accumulated totals and derive `delta`/`delta_delta`
///
/// The first cell has both differences at 0, the second has only a delta,
/// every later cell has both.
pub fn finalize_cells(cells: &mut [FeatureCell]) {
    for cell in cells.iter_mut().filter(|c| c.count > 0.0) {
        cell.avg_followers /= cell.count;
        cell.avg_statuses /= cell.count;
        cell.retweet_rate /= cell.count;
    }

    for i in 0..cells.len() {
        let (delta, delta_delta) = match i {
            0 => (0.0, 0.0),
            1 => (cells[1].count - cells[0].count, 0.0),
            _ => {
                let delta = cells[i].count - cells[i - 1].count;
                (delta, delta - cells[i - 1].delta)
            }
        };
        cells[i].delta = delta;
        cells[i].delta_delta = delta_delta;
    }
}

/// Populate `lines` from a stream of decoded records
///
/// Stops at the first decode error. The lines are then left holding the
/// raw totals of the first pass, without averages or differences, and
/// should be discarded.
pub fn populate<I>(lines: &mut [SeriesLine], records: I) -> FeedResult<PopulationStats>
where
    I: IntoIterator<Item = FeedResult<Record>>,
{
    let mut populator = SeriesPopulator::new(lines);
    for record in records {
        populator.accumulate(&record?);
    }
    let stats = populator.finish();

    tracing::info!(
        records = stats.records_read,
        attributed = stats.records_attributed,
        updates = stats.cell_updates,
        lines_touched = stats.lines_touched,
        duration_ms = stats.duration_ms,
        "Populated series"
    );
    Ok(stats)
}
