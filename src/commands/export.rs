use anyhow::{Context, Result};
use std::path::Path;

use twittp::model::{export_numpy, TrendModel};

pub fn export(model_path: &Path, output_dir: &Path) -> Result<()> {
    let model = TrendModel::load(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

    let metadata = export_numpy(&model, output_dir)
        .with_context(|| format!("Failed to export to {}", output_dir.display()))?;

    println!("Exported {} lines to {}", metadata.lines, output_dir.display());
    println!(
        "  features.npy: [{}, {}, {}] f64",
        metadata.lines,
        metadata.width,
        metadata.features.len()
    );
    println!(
        "  labels.npy:   [{}] u8 ({} positive, {} negative)",
        metadata.lines, metadata.positives, metadata.negatives
    );
    Ok(())
}
