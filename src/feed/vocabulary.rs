//! Stopwords and the word-frequency model
//!
//! The word-frequency model is a bag of words over tweet text. It supplies
//! names for negative series: words that are common in the stream but were
//! never announced as trends.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use super::records::Record;
use super::{FeedError, FeedResult};

/// How candidate names are drawn from the word-frequency model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameSampling {
    /// Always take the most frequent remaining word
    #[default]
    Greedy,

    /// Sample without replacement, proportionally to frequency
    Weighted,
}

impl NameSampling {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "greedy" => Some(Self::Greedy),
            "weighted" => Some(Self::Weighted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Weighted => "weighted",
        }
    }
}

impl std::fmt::Display for NameSampling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Words ignored when building the word-frequency model
#[derive(Debug, Clone, Default)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse comma-separated words, any number per line
    pub fn from_reader<R: BufRead>(reader: R) -> FeedResult<Self> {
        let mut words = HashSet::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| FeedError::Read { line: i + 1, source })?;
            words.extend(
                line.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_lowercase),
            );
        }
        Ok(Self(words))
    }

    /// Load a stopword CSV file
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

fn word_pattern() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"^#?\w\w+$").expect("Invalid regex pattern"))
}

/// Token counts over tweet text
#[derive(Debug, Clone, Default)]
pub struct WordFrequency {
    counts: HashMap<String, u64>,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the eligible tokens of one text
    ///
    /// Tokens are whitespace-separated, lower-cased, must be two or more
    /// word characters with an optional leading `#`, and must not be
    /// stopwords.
    pub fn add_text(&mut self, text: &str, stopwords: &Stopwords) {
        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            if stopwords.contains(&word) || !word_pattern().is_match(&word) {
                continue;
            }
            *self.counts.entry(word).or_insert(0) += 1;
        }
    }

    /// Build a model from decoded records
    pub fn from_records<'a, I>(records: I, stopwords: &Stopwords) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut model = Self::new();
        for record in records {
            model.add_text(&record.text, stopwords);
        }
        model
    }

    /// Build a model by streaming a record file
    pub fn from_file(path: &Path, stopwords: &Stopwords) -> crate::error::Result<Self> {
        let mut model = Self::new();
        for record in super::RecordStream::open(path)? {
            model.add_text(&record?.text, stopwords);
        }
        tracing::debug!(words = model.len(), "Built word-frequency model");
        Ok(model)
    }

    /// Frequency of a word, 0 when unseen
    #[must_use]
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Words by descending frequency, ties in lexical order
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self
            .counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Up to `n` distinct words that are not in `exclude`
    ///
    /// Fewer than `n` names are returned only when the model runs out of
    /// eligible words.
    pub fn candidate_names<R: Rng + ?Sized>(
        &self,
        n: usize,
        exclude: &HashSet<&str>,
        sampling: NameSampling,
        rng: &mut R,
    ) -> Vec<String> {
        let mut candidates: Vec<(&str, u64)> = self
            .ranked()
            .into_iter()
            .filter(|(word, _)| !exclude.contains(word))
            .collect();

        match sampling {
            NameSampling::Greedy => candidates
                .into_iter()
                .take(n)
                .map(|(word, _)| word.to_string())
                .collect(),
            NameSampling::Weighted => {
                let mut names = Vec::with_capacity(n);
                while names.len() < n && !candidates.is_empty() {
                    let Ok(dist) = WeightedIndex::new(candidates.iter().map(|(_, c)| *c)) else {
                        break;
                    };
                    let (word, _) = candidates.remove(dist.sample(rng));
                    names.push(word.to_string());
                }
                names
            }
        }
    }
}
