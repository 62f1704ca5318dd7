//! Positive series derived from the trend feed

use crate::feed::TrendTimeline;
use crate::series::SeriesLine;

/// Turn a topic timeline into a fully-labeled line over its longest run
///
/// Returns `None` for a timeline without any window.
pub fn positive_line(timeline: &TrendTimeline) -> Option<SeriesLine> {
    let (start, len) = timeline.longest_run()?;
    Some(SeriesLine::blank(
        timeline.name.clone(),
        start,
        timeline.window_size,
        len,
        true,
    ))
}

/// Derive, filter and pad the positive lines of a feed
///
/// Lines shorter than `minimum_len` windows are dropped before
/// `lead_in` unlabeled windows are prepended to the survivors.
pub fn positive_lines(
    timelines: &[TrendTimeline],
    minimum_len: usize,
    lead_in: usize,
) -> Vec<SeriesLine> {
    let mut lines: Vec<SeriesLine> = timelines
        .iter()
        .filter_map(positive_line)
        .filter(|line| {
            let keep = line.len() >= minimum_len;
            if !keep {
                tracing::debug!(name = %line.name, len = line.len(), "Dropping short trend");
            }
            keep
        })
        .collect();

    for line in &mut lines {
        line.prepend_lead_in(lead_in);
    }

    tracing::info!(
        timelines = timelines.len(),
        kept = lines.len(),
        minimum_len,
        lead_in,
        "Derived positive lines"
    );
    lines
}
