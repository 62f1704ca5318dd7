use anyhow::{Context, Result};
use std::path::PathBuf;

use twittp::config::Config;
use twittp::pipeline::{ModelBuilder, PopulationStats};

/// Inputs and output of a `build` run
pub struct BuildParams {
    pub trends: PathBuf,
    pub tweets: PathBuf,
    pub stopwords: PathBuf,
    pub output: PathBuf,
}

fn records_summary(stats: &PopulationStats) -> String {
    format!(
        "Records: {} read, {} attributed ({:.1}%)",
        stats.records_read,
        stats.records_attributed,
        stats.attribution_rate()
    )
}

pub fn build(config: &Config, params: BuildParams) -> Result<()> {
    println!("Building trend model");
    println!("================================");
    println!("  Trends:    {}", params.trends.display());
    println!("  Tweets:    {}", params.tweets.display());
    println!("  Stopwords: {}", params.stopwords.display());
    println!(
        "  Minimum trend size: {} windows of {}s",
        config.pipeline.minimum_trend_size, config.pipeline.window_size
    );
    println!("  Lead-in: {} windows", config.pipeline.lead_in_windows);
    println!(
        "  Negative names: {} (seed {})",
        config.pipeline.name_sampling, config.pipeline.seed
    );

    let builder = ModelBuilder::new(config.pipeline.clone()).context("Invalid pipeline settings")?;
    let (model, report) = builder
        .build_from_files(&params.trends, &params.tweets, &params.stopwords)
        .context("Failed to build model")?;

    model
        .save(&params.output)
        .with_context(|| format!("Failed to save model to {}", params.output.display()))?;

    println!("\nModel saved to {}", params.output.display());
    println!("  Positive lines: {}", report.positive_lines);
    println!("  Negative lines: {}", report.negative_lines);
    if let Some(profile) = &report.positive_profile {
        println!(
            "  Line length: mean {:.1}, std dev {:.1}, range {}..={}",
            profile.mean, profile.std_dev, profile.min, profile.max
        );
    }
    println!("  {}", records_summary(&report.population));
    println!("  Took {} ms", report.population.duration_ms);

    Ok(())
}
