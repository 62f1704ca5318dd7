//! Persisted representation of a model
//!
//! A model persists as a tree: model -> lines -> cells. Each level has a
//! plain record type and converts through the [`Persist`] trait, so the
//! in-memory types stay free of any encoding concern. JSON is applied only
//! at the file boundary.
//!
//! Every record field is optional on the way in: a record missing any
//! required field reconstructs to `None` instead of a partial object.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ModelError, TrendModel};
use crate::series::{FeatureCell, SeriesLine};

/// Conversion between an in-memory value and its persisted record
pub trait Persist: Sized {
    type Record: Serialize + for<'de> Deserialize<'de>;

    fn to_record(&self) -> Self::Record;

    /// Rebuild from a record, `None` if any required field is missing
    fn from_record(record: Self::Record) -> Option<Self>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub trending: Option<bool>,
    pub count: Option<f64>,
    pub delta: Option<f64>,
    pub delta_delta: Option<f64>,
    pub avg_followers: Option<f64>,
    pub avg_statuses: Option<f64>,
    pub retweets: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub name: Option<String>,
    pub start_ts: Option<i64>,
    pub window_size: Option<i64>,
    pub data: Option<Vec<CellRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub trends: Option<Vec<LineRecord>>,
}

impl Persist for FeatureCell {
    type Record = CellRecord;

    fn to_record(&self) -> CellRecord {
        CellRecord {
            trending: Some(self.is_trending),
            count: Some(self.count),
            delta: Some(self.delta),
            delta_delta: Some(self.delta_delta),
            avg_followers: Some(self.avg_followers),
            avg_statuses: Some(self.avg_statuses),
            retweets: Some(self.retweet_rate),
        }
    }

    fn from_record(record: CellRecord) -> Option<Self> {
        Some(Self {
            is_trending: record.trending?,
            count: record.count?,
            delta: record.delta?,
            delta_delta: record.delta_delta?,
            avg_followers: record.avg_followers?,
            avg_statuses: record.avg_statuses?,
            retweet_rate: record.retweets?,
        })
    }
}

impl Persist for SeriesLine {
    type Record = LineRecord;

    fn to_record(&self) -> LineRecord {
        LineRecord {
            name: Some(self.name.clone()),
            start_ts: Some(self.start_timestamp),
            window_size: Some(self.window_size),
            data: Some(self.cells.iter().map(Persist::to_record).collect()),
        }
    }

    fn from_record(record: LineRecord) -> Option<Self> {
        let name = record.name.filter(|n| !n.is_empty())?;
        let window_size = record.window_size.filter(|w| *w > 0)?;
        let start_timestamp = record.start_ts?;
        let cells = record
            .data?
            .into_iter()
            .map(FeatureCell::from_record)
            .collect::<Option<Vec<_>>>()?;

        Some(Self::new(name, start_timestamp, window_size, cells))
    }
}

impl Persist for TrendModel {
    type Record = ModelRecord;

    fn to_record(&self) -> ModelRecord {
        ModelRecord {
            trends: Some(self.lines.iter().map(Persist::to_record).collect()),
        }
    }

    fn from_record(record: ModelRecord) -> Option<Self> {
        let lines = record
            .trends?
            .into_iter()
            .map(SeriesLine::from_record)
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(lines))
    }
}

impl TrendModel {
    /// Encode as a JSON document
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Decode a JSON document
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let record: ModelRecord = serde_json::from_str(json)?;
        Self::from_record(record).ok_or_else(|| {
            ModelError::MalformedModel {
                reason: "missing required field".to_string(),
            }
            .into()
        })
    }

    /// Save to a JSON file
    ///
    /// The file is written through a temporary sibling and renamed into
    /// place.
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, self.to_json()?)?;
        std::fs::rename(temp_path, path)?;
        tracing::info!(path = %path.display(), lines = self.len(), "Saved model");
        Ok(())
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), lines = model.len(), "Loaded model");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> TrendModel {
        let mut line = SeriesLine::blank("#rust lang", 1_330_560_000, 120, 3, false);
        line.cells[1] = FeatureCell {
            is_trending: true,
            count: 0.75,
            delta: 1.0,
            delta_delta: -0.5,
            avg_followers: 0.125,
            avg_statuses: 1.0,
            retweet_rate: 0.3,
        };
        TrendModel::new(vec![line, SeriesLine::blank("other", 0, 60, 2, false)])
    }

    #[test]
    fn test_json_roundtrip() {
        let model = sample_model();
        let restored = TrendModel::from_json(&model.to_json().unwrap()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_field_names() {
        let json = sample_model().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let line = &value["trends"][0];
        assert_eq!(line["name"], "#rust lang");
        assert_eq!(line["start_ts"], 1_330_560_000);
        assert_eq!(line["window_size"], 120);
        assert_eq!(line["data"][1]["trending"], true);
        assert_eq!(line["data"][1]["retweets"], 0.3);
    }

    #[test]
    fn test_missing_cell_field_is_absent() {
        let record = CellRecord {
            count: None,
            ..FeatureCell::new(true).to_record()
        };
        assert!(FeatureCell::from_record(record).is_none());
    }

    #[test]
    fn test_one_bad_cell_rejects_whole_model() {
        let json = r#"{"trends": [{"name": "x", "start_ts": 0, "window_size": 120,
            "data": [{"trending": true, "count": 1, "delta": 0, "delta_delta": 0,
                      "avg_followers": 0, "avg_statuses": 0}]}]}"#;
        let err = TrendModel::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Model(ModelError::MalformedModel { .. })
        ));
    }

    #[test]
    fn test_missing_trends_is_absent() {
        assert!(TrendModel::from_record(ModelRecord::default()).is_none());
        assert!(TrendModel::from_json("{}").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("model.json");
        let model = sample_model();

        model.save(&path).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(TrendModel::load(&path).unwrap(), model);
    }
}
