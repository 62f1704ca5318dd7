//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow:
//! 1. Trend feed, tweet stream and stopword decoding
//! 2. Positive and negative line construction
//! 3. Population and normalization
//! 4. Persistence, evaluation and export

use std::io::Cursor;
use tempfile::TempDir;
use twittp::config::PipelineConfig;
use twittp::feed::{read_trend_feed, NameSampling, RecordStream, Stopwords, WordFrequency};
use twittp::model::{export_numpy, Outcome, TrendModel};
use twittp::pipeline::ModelBuilder;
use twittp::series::CellWeights;

use super::fixtures::{
    test_config, trend_feed, tweet_stream, write_inputs, BASE_TS, LEAD_IN, LONG_TREND_WINDOWS,
    STOPWORDS, WINDOW,
};

// ============================================================================
// Build Tests
// ============================================================================

#[test]
fn test_build_from_files() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    let builder = ModelBuilder::new(test_config()).unwrap();

    let (model, report) = builder
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();

    // Short trend dropped, one negative per positive
    assert_eq!(report.positive_lines, 1);
    assert_eq!(report.negative_lines, 1);
    assert_eq!(model.len(), 2);

    let positive = &model.lines[0];
    assert_eq!(positive.name, "#rust");
    assert_eq!(positive.len(), LONG_TREND_WINDOWS + LEAD_IN);
    assert_eq!(positive.start_timestamp, BASE_TS - WINDOW * LEAD_IN as i64);
    assert!(positive.cells[..LEAD_IN].iter().all(|c| !c.is_trending));
    assert!(positive.cells[LEAD_IN..].iter().all(|c| c.is_trending));

    // Most frequent word that is not a positive name
    let negative = &model.lines[1];
    assert_eq!(negative.name, "coffee");
    assert!(!negative.is_trending());
    assert_eq!(negative.len(), positive.len());

    assert_eq!(report.population.records_read, 50);
    assert_eq!(report.population.records_attributed, 40);
    assert_eq!(report.population.lines_touched, 2);
}

#[test]
fn test_built_model_is_normalized() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    let builder = ModelBuilder::new(test_config()).unwrap();
    let (model, _) = builder
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();

    let positive = &model.lines[0];
    assert!(positive.cells[..LEAD_IN].iter().all(|c| c.count == 0.0));
    assert!(positive.cells[LEAD_IN..].iter().all(|c| c.count == 1.0));

    let max_followers = positive
        .cells
        .iter()
        .map(|c| c.avg_followers)
        .fold(0.0, f64::max);
    assert_eq!(max_followers, 1.0);

    // Retweet rate is a ratio and stays unscaled
    assert_eq!(positive.cells[LEAD_IN].retweet_rate, 1.0);
    assert_eq!(positive.cells[LEAD_IN + 1].retweet_rate, 0.0);
}

#[test]
fn test_build_from_readers_matches_files() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    let builder = ModelBuilder::new(test_config()).unwrap();
    let (from_files, _) = builder
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();

    let timelines = read_trend_feed(Cursor::new(trend_feed()), WINDOW).unwrap();
    let stopwords = Stopwords::from_reader(Cursor::new(STOPWORDS)).unwrap();
    let records: Vec<_> = RecordStream::new(Cursor::new(tweet_stream()))
        .collect::<Result<_, _>>()
        .unwrap();
    let vocabulary = WordFrequency::from_records(&records, &stopwords);

    let (from_readers, _) = builder
        .build(&timelines, &vocabulary, records.into_iter().map(Ok))
        .unwrap();
    assert_eq!(from_readers, from_files);
}

#[test]
fn test_same_seed_same_model() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    let config = PipelineConfig {
        name_sampling: NameSampling::Weighted,
        ..test_config()
    };

    let build = || {
        ModelBuilder::new(config.clone())
            .unwrap()
            .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
            .unwrap()
            .0
    };
    assert_eq!(build(), build());
}

#[test]
fn test_minimum_trend_size_applies_before_lead_in() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());

    // 20 windows pass a minimum of 20 even though lead-in would not count
    let config = PipelineConfig {
        minimum_trend_size: LONG_TREND_WINDOWS,
        ..test_config()
    };
    let (model, _) = ModelBuilder::new(config)
        .unwrap()
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();
    assert_eq!(model.positive_count(), 1);

    // The short trend survives once the minimum is low enough
    let config = PipelineConfig {
        minimum_trend_size: 3,
        ..test_config()
    };
    let (model, report) = ModelBuilder::new(config)
        .unwrap()
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();
    assert_eq!(report.positive_lines, 2);
    assert_eq!(model.positive_count(), 2);
    assert_eq!(model.lines[1].name, "#blip");
}

// ============================================================================
// Persistence, Evaluation and Export Tests
// ============================================================================

#[test]
fn test_save_load_evaluate() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    let (model, _) = ModelBuilder::new(test_config())
        .unwrap()
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();

    let path = temp_dir.path().join("model.json");
    model.save(&path).unwrap();
    let mut loaded = TrendModel::load(&path).unwrap();
    assert_eq!(loaded, model);

    // Two lines of opposite class can only match each other
    let evaluation = loaded.leave_one_out(&CellWeights::default()).unwrap();
    assert_eq!(evaluation.matches.len(), 2);
    assert_eq!(evaluation.indices(Outcome::FalseNegative), vec![0]);
    assert_eq!(evaluation.indices(Outcome::FalsePositive), vec![1]);
    assert_eq!(evaluation.precision(), Some(0.0));
    assert_eq!(evaluation.recall(), Some(0.0));

    // Normalizing a saved model again changes nothing
    assert_eq!(loaded, model);
}

#[test]
fn test_export_built_model() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    let (model, _) = ModelBuilder::new(test_config())
        .unwrap()
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap();

    let out = temp_dir.path().join("export");
    let metadata = export_numpy(&model, &out).unwrap();
    assert_eq!(metadata.lines, 2);
    assert_eq!(metadata.width, LONG_TREND_WINDOWS + LEAD_IN);
    assert_eq!(metadata.positives, 1);
    assert_eq!(metadata.negatives, 1);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("metadata.json")).unwrap()).unwrap();
    assert_eq!(written["features"][0], "count");
    assert!(out.join("features.npy").exists());
    assert!(out.join("labels.npy").exists());
}
