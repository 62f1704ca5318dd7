//! Error handling scenarios
//!
//! Malformed inputs, inputs too small to build a model, and damaged model
//! files must fail with the right error and category instead of producing
//! a partial model.

use tempfile::TempDir;
use twittp::error::{Error, ErrorCategory, FeedError, ModelError, PipelineError};
use twittp::model::TrendModel;
use twittp::pipeline::ModelBuilder;
use twittp::series::CellWeights;

use super::fixtures::{
    test_config, trend_feed, tweet, tweet_stream, write_inputs, write_inputs_with, BASE_TS,
    STOPWORDS,
};

fn build(dir: &TempDir, trends: &str, tweets: &str, stopwords: &str) -> Result<TrendModel, Error> {
    let inputs = write_inputs_with(dir.path(), trends, tweets, stopwords);
    ModelBuilder::new(test_config())
        .unwrap()
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .map(|(model, _)| model)
}

#[test]
fn test_malformed_tweet_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let tweets = format!("{}\nnot json at all\n", tweet("#rust", BASE_TS, 1, 1, false));

    let err = build(&temp_dir, &trend_feed(), &tweets, STOPWORDS).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
    match err {
        Error::Feed(feed_err) => {
            assert!(matches!(feed_err, FeedError::MalformedLine { line: 2, .. }));
            assert_eq!(feed_err.line(), Some(2));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_created_at_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let tweets = r##"{"text": "#rust", "created_at": "yesterday"}"##;

    let err = build(&temp_dir, &trend_feed(), tweets, STOPWORDS).unwrap_err();
    assert!(matches!(
        err,
        Error::Feed(FeedError::InvalidTimestamp { line: 1, ref value }) if value == "yesterday"
    ));
}

#[test]
fn test_malformed_trend_feed() {
    let temp_dir = TempDir::new().unwrap();
    let trends = format!("{}\n{{\"as_of\": 12", trend_feed());

    let err = build(&temp_dir, &trends, &tweet_stream(), STOPWORDS).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = write_inputs(temp_dir.path());
    std::fs::remove_file(&inputs.stopwords).unwrap();

    let err = ModelBuilder::new(test_config())
        .unwrap()
        .build_from_files(&inputs.trends, &inputs.tweets, &inputs.stopwords)
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.category(), ErrorCategory::Storage);
}

#[test]
fn test_no_trend_long_enough() {
    let temp_dir = TempDir::new().unwrap();
    let trends: String = trend_feed().lines().take(5).collect::<Vec<_>>().join("\n");

    let err = build(&temp_dir, &trends, &tweet_stream(), STOPWORDS).unwrap_err();
    assert!(matches!(
        err,
        Error::Pipeline(PipelineError::NoPositiveLines { minimum_len: 15 })
    ));
}

#[test]
fn test_vocabulary_exhausted() {
    let temp_dir = TempDir::new().unwrap();
    // Every word is either the trend itself or a stopword
    let tweets = tweet("#rust is the", BASE_TS + 10, 1, 1, false);

    let err = build(&temp_dir, &trend_feed(), &tweets, STOPWORDS).unwrap_err();
    assert!(matches!(
        err,
        Error::Pipeline(PipelineError::VocabularyExhausted {
            requested: 1,
            available: 0
        })
    ));
    assert_eq!(err.category(), ErrorCategory::Evaluation);
}

#[test]
fn test_damaged_model_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.json");
    std::fs::write(
        &path,
        r#"{"trends": [{"name": "x", "start_ts": 0, "data": []}]}"#,
    )
    .unwrap();

    let err = TrendModel::load(&path).unwrap_err();
    assert!(matches!(err, Error::Model(ModelError::MalformedModel { .. })));
    assert_eq!(err.category(), ErrorCategory::Parsing);

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(TrendModel::load(&path).unwrap_err(), Error::Json(_)));
}

#[test]
fn test_evaluating_empty_model() {
    let mut model = TrendModel::default();
    assert!(matches!(
        model.leave_one_out(&CellWeights::default()),
        Err(ModelError::TooFewLines { found: 0 })
    ));
}
