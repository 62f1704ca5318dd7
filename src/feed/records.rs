//! Raw tweet stream decoding

use chrono::DateTime;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::{FeedError, FeedResult};

/// Format of the `created_at` field, e.g. `Thu Mar 01 18:04:11 +0000 2012`
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Wire shape of one tweet line
#[derive(Debug, Deserialize)]
struct RawRecord {
    text: String,
    created_at: String,
    #[serde(default)]
    user_followers: u64,
    #[serde(default)]
    user_statuses: u64,
    #[serde(default)]
    retweeted: bool,
}

/// One decoded tweet
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub text: String,

    /// UTC seconds since the epoch
    pub timestamp: i64,

    /// Author follower count
    pub followers: u64,

    /// Author status count
    pub statuses: u64,

    pub retweeted: bool,
}

impl Record {
    pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
            followers: 0,
            statuses: 0,
            retweeted: false,
        }
    }

    /// Decode one JSON line
    pub fn from_json_line(line: &str, line_no: usize) -> FeedResult<Self> {
        let raw: RawRecord = serde_json::from_str(line).map_err(|source| FeedError::MalformedLine {
            line: line_no,
            source,
        })?;

        let timestamp = DateTime::parse_from_str(&raw.created_at, CREATED_AT_FORMAT)
            .map_err(|_| FeedError::InvalidTimestamp {
                line: line_no,
                value: raw.created_at.clone(),
            })?
            .timestamp();

        Ok(Self {
            text: raw.text,
            timestamp,
            followers: raw.user_followers,
            statuses: raw.user_statuses,
            retweeted: raw.retweeted,
        })
    }

    /// Whitespace tokens of the text
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Iterator over the records of a line-oriented stream
///
/// Blank lines are skipped. The first decode or read failure is yielded as
/// an error; callers are expected to stop there.
pub struct RecordStream<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl RecordStream<BufReader<File>> {
    /// Open a record file
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = FeedResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(FeedError::Read {
                        line: self.line_no,
                        source,
                    }))
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(Record::from_json_line(line, self.line_no));
        }
    }
}
