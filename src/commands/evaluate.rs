use anyhow::{Context, Result};
use std::path::Path;

use twittp::config::Config;
use twittp::model::{Outcome, TrendModel};

fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{v:.3}"))
}

pub fn evaluate(config: &Config, model_path: &Path, json: bool) -> Result<()> {
    let mut model = TrendModel::load(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

    let evaluation = model
        .leave_one_out(&config.distance.weights)
        .context("Evaluation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!("Leave-one-out evaluation");
    println!("================================");
    println!(
        "  Lines: {} ({} positive, {} negative)",
        model.len(),
        model.positive_count(),
        model.negative_count()
    );
    println!("  True positives:  {}", evaluation.true_positives);
    println!("  False negatives: {}", evaluation.false_negatives);
    println!("  False positives: {}", evaluation.false_positives);
    println!("  True negatives:  {}", evaluation.true_negatives);
    println!("  Precision: {}", format_ratio(evaluation.precision()));
    println!("  Recall:    {}", format_ratio(evaluation.recall()));

    for (label, outcome) in [
        ("False negatives", Outcome::FalseNegative),
        ("False positives", Outcome::FalsePositive),
    ] {
        let indices = evaluation.indices(outcome);
        if indices.is_empty() {
            continue;
        }
        println!("\n{label}:");
        for index in indices {
            let entry = &evaluation.matches[index];
            println!(
                "  [{index}] {} -> [{}] {} (distance {:.4})",
                model.lines[index].name,
                entry.nearest,
                model.lines[entry.nearest].name,
                entry.distance
            );
        }
    }

    Ok(())
}
