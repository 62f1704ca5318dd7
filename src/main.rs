use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twittp::config::Config;
use twittp::feed::NameSampling;

mod commands;

use commands::BuildParams;

#[derive(Parser)]
#[command(
    name = "twittp",
    version,
    about = "Twitter trend time-series builder and nearest-neighbor evaluator",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json), overrides the configuration
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and save a normalized model from the raw inputs
    Build {
        /// Trend feed, one JSON snapshot per line
        #[arg(long)]
        trends: PathBuf,

        /// Tweet stream, one JSON record per line
        #[arg(long)]
        tweets: PathBuf,

        /// Stopword list, comma-separated
        #[arg(long)]
        stopwords: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "model.json")]
        output: PathBuf,

        /// Override the sampling seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the minimum trend size, in windows
        #[arg(long)]
        minimum_trend_size: Option<usize>,

        /// Override the negative name sampling (greedy, weighted)
        #[arg(long)]
        name_sampling: Option<String>,
    },

    /// Run leave-one-out evaluation on a saved model
    Evaluate {
        /// Model file
        #[arg(short, long, default_value = "model.json")]
        model: PathBuf,

        /// Print the evaluation as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Export a saved model as NumPy arrays
    Export {
        /// Model file
        #[arg(short, long, default_value = "model.json")]
        model: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env();
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    if let Commands::Build {
        seed,
        minimum_trend_size,
        name_sampling,
        ..
    } = &cli.command
    {
        if let Some(seed) = seed {
            config.pipeline.seed = *seed;
        }
        if let Some(size) = minimum_trend_size {
            config.pipeline.minimum_trend_size = *size;
        }
        if let Some(sampling) = name_sampling {
            config.pipeline.name_sampling = NameSampling::parse(sampling)
                .with_context(|| format!("Unknown name sampling '{sampling}'"))?;
        }
    }
    config.validate().context("Invalid configuration")?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("twittp starting");

    match cli.command {
        Commands::Build {
            trends,
            tweets,
            stopwords,
            output,
            ..
        } => {
            tracing::info!(
                trends = %trends.display(),
                tweets = %tweets.display(),
                output = %output.display(),
                seed = config.pipeline.seed,
                "Starting build command"
            );
            commands::build(
                &config,
                BuildParams {
                    trends,
                    tweets,
                    stopwords,
                    output,
                },
            )?;
        }

        Commands::Evaluate { model, json } => {
            tracing::info!(model = %model.display(), "Starting evaluate command");
            commands::evaluate(&config, &model, json)?;
        }

        Commands::Export { model, output_dir } => {
            tracing::info!(
                model = %model.display(),
                output_dir = %output_dir.display(),
                "Starting export command"
            );
            commands::export(&model, &output_dir)?;
        }
    }

    tracing::info!("twittp completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("twittp=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!("twittp={level},warn"))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
