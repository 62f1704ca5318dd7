//! NumPy export of the feature tensor
//!
//! Writes three files into the output directory:
//!
//! - `features.npy`: `[lines, width, 6]` f64 tensor, zero-padded
//! - `labels.npy`: `[lines]` u8, 1 for lines that ever trend
//! - `metadata.json`: shape, feature order, class counts

use ndarray_npy::write_npy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{TrendModel, FEATURE_COUNT};

/// Feature order of the last tensor axis
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "count",
    "delta",
    "delta_delta",
    "avg_followers",
    "avg_statuses",
    "retweets",
];

/// Description of an export written next to the arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub lines: usize,
    pub width: usize,
    pub features: Vec<String>,
    pub positives: usize,
    pub negatives: usize,
    pub export_timestamp: String,
}

/// Write the model's matrix and labels as `.npy` files
pub fn export_numpy(model: &TrendModel, output_dir: &Path) -> crate::error::Result<ExportMetadata> {
    std::fs::create_dir_all(output_dir)?;

    let (features, labels) = model.matrix();
    write_npy(output_dir.join("features.npy"), &features)?;
    write_npy(output_dir.join("labels.npy"), &labels)?;

    let metadata = ExportMetadata {
        lines: model.len(),
        width: model.width(),
        features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        positives: model.positive_count(),
        negatives: model.negative_count(),
        export_timestamp: chrono::Utc::now().to_rfc3339(),
    };
    std::fs::write(
        output_dir.join("metadata.json"),
        serde_json::to_string_pretty(&metadata)?,
    )?;

    tracing::info!(
        dir = %output_dir.display(),
        lines = metadata.lines,
        width = metadata.width,
        "Exported feature tensor"
    );
    Ok(metadata)
}
