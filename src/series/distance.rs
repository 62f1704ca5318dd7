//! Alignment distances between cell sequences
//!
//! Two algorithms are provided:
//!
//! - [`warp_distance`] - dynamic time warping, allowing local stretching and
//!   compression of the time axis
//! - [`sliding_offset_distance`] - rigid translation of the shorter sequence
//!   across the longer one
//!
//! Both always compare the shorter sequence against the longer one so the
//! result does not depend on argument order. Comparing against an empty
//! sequence yields 0.

use super::cell::{CellWeights, FeatureCell};

/// Order two slices so the shorter one comes first
fn shorter_first<'a, T>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    if a.len() > b.len() {
        (b, a)
    } else {
        (a, b)
    }
}

/// Dynamic time warping distance between two cell sequences
///
/// The cost table starts at `D[0][0] = 0`, the first row and column
/// accumulate the pairwise cell distance along their axis, and every other
/// entry adds the pairwise distance to the cheapest of its three
/// predecessors. The result is the bottom-right entry.
///
/// Only two rows of the table are kept in memory.
#[must_use]
pub fn warp_distance(a: &[FeatureCell], b: &[FeatureCell], weights: &CellWeights) -> f64 {
    let (a, b) = shorter_first(a, b);
    if a.is_empty() {
        return 0.0;
    }

    let m = b.len();
    let mut previous = vec![0.0_f64; m];
    let mut current = vec![0.0_f64; m];

    // First row
    for j in 1..m {
        previous[j] = a[0].weighted_distance(&b[j], weights) + previous[j - 1];
    }

    for cell in &a[1..] {
        current[0] = cell.weighted_distance(&b[0], weights) + previous[0];
        for j in 1..m {
            let best = previous[j].min(current[j - 1]).min(previous[j - 1]);
            current[j] = cell.weighted_distance(&b[j], weights) + best;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[m - 1]
}

/// Minimum total cell distance over every rigid offset of the shorter
/// sequence inside the longer one
#[must_use]
pub fn sliding_offset_distance(
    a: &[FeatureCell],
    b: &[FeatureCell],
    weights: &CellWeights,
) -> f64 {
    let (short, long) = shorter_first(a, b);
    if short.is_empty() {
        return 0.0;
    }

    (0..=long.len() - short.len())
        .map(|offset| {
            short
                .iter()
                .zip(&long[offset..])
                .map(|(x, y)| x.weighted_distance(y, weights))
                .sum::<f64>()
        })
        .fold(f64::INFINITY, f64::min)
}

/// Inclusive range of indices holding non-zero values
fn signal_span(values: &[f64]) -> Option<&[f64]> {
    let start = values.iter().position(|v| *v != 0.0)?;
    let end = values.iter().rposition(|v| *v != 0.0)?;
    Some(&values[start..=end])
}

/// Sliding alignment distance over raw numeric arrays
///
/// Each array is trimmed to the span between its first and last non-zero
/// entry, then the shorter span slides across the longer one and the
/// smallest sum of squared differences wins. Arrays without any non-zero
/// entry have distance 0 to everything.
#[must_use]
pub fn array_alignment_distance(a: &[f64], b: &[f64]) -> f64 {
    let (Some(a), Some(b)) = (signal_span(a), signal_span(b)) else {
        return 0.0;
    };
    let (short, long) = shorter_first(a, b);

    (0..=long.len() - short.len())
        .map(|offset| {
            short
                .iter()
                .zip(&long[offset..])
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>()
        })
        .fold(f64::INFINITY, f64::min)
}
