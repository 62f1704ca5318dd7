//! Test fixtures for integration tests
//!
//! Provides builders for trend feed snapshots and tweet lines, and a
//! small on-disk input set with one long trend, one short trend and a
//! frequent non-trending word.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use twittp::config::PipelineConfig;
use twittp::feed::{AS_OF_FORMAT, CREATED_AT_FORMAT};

/// 2012-03-01T00:00:00Z, aligned to a 120s window
pub const BASE_TS: i64 = 1_330_560_000;

pub const WINDOW: i64 = 120;

/// Windows `#rust` trends for
pub const LONG_TREND_WINDOWS: usize = 20;

/// Windows `#blip` trends for
pub const SHORT_TREND_WINDOWS: usize = 3;

/// Lead-in used by [`test_config`]
pub const LEAD_IN: usize = 5;

fn utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap()
}

/// One trend feed line
pub fn snapshot(ts: i64, names: &[&str]) -> String {
    let trends: Vec<_> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();
    serde_json::json!({
        "as_of": utc(ts).format(AS_OF_FORMAT).to_string(),
        "trends": trends,
    })
    .to_string()
}

/// One tweet stream line
pub fn tweet(text: &str, ts: i64, followers: u64, statuses: u64, retweeted: bool) -> String {
    serde_json::json!({
        "text": text,
        "created_at": utc(ts).format(CREATED_AT_FORMAT).to_string(),
        "user_followers": followers,
        "user_statuses": statuses,
        "retweeted": retweeted,
    })
    .to_string()
}

/// Snapshot `k` assigns its names to window `k - 1`
pub fn trend_feed() -> String {
    (0..=LONG_TREND_WINDOWS + 5)
        .map(|k| {
            let ts = BASE_TS + WINDOW * k as i64;
            let mut names = Vec::new();
            if (1..=LONG_TREND_WINDOWS).contains(&k) {
                names.push("#rust");
            }
            if (1..=SHORT_TREND_WINDOWS).contains(&k) {
                names.push("#blip");
            }
            snapshot(ts, &names)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `#rust` tweet per trending window and thirty `coffee time` tweets
pub fn tweet_stream() -> String {
    let mut lines = Vec::new();
    for i in 0..LONG_TREND_WINDOWS as i64 {
        let ts = BASE_TS + WINDOW * i + 10;
        lines.push(tweet("#rust is great", ts, 100 + i as u64, 50, i % 2 == 0));
    }
    for i in 0..30 {
        lines.push(tweet("coffee time", BASE_TS + WINDOW * i + 5, 10, 20, false));
    }
    lines.join("\n")
}

pub const STOPWORDS: &str = "is\nthe\na\n";

/// Paths of the three input files
pub struct Inputs {
    pub trends: PathBuf,
    pub tweets: PathBuf,
    pub stopwords: PathBuf,
}

/// Write the default inputs into `dir`
pub fn write_inputs(dir: &Path) -> Inputs {
    write_inputs_with(dir, &trend_feed(), &tweet_stream(), STOPWORDS)
}

pub fn write_inputs_with(dir: &Path, trends: &str, tweets: &str, stopwords: &str) -> Inputs {
    let inputs = Inputs {
        trends: dir.join("trends.txt"),
        tweets: dir.join("tweets.json"),
        stopwords: dir.join("stopwords.txt"),
    };
    std::fs::write(&inputs.trends, trends).unwrap();
    std::fs::write(&inputs.tweets, tweets).unwrap();
    std::fs::write(&inputs.stopwords, stopwords).unwrap();
    inputs
}

/// Pipeline settings sized for the fixtures
pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        lead_in_windows: LEAD_IN,
        seed: 7,
        ..PipelineConfig::default()
    }
}
