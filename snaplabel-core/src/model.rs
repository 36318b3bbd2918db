//! Domain model — the one persisted entity and its label entries.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A detected concept with its confidence score in [0, 100].
///
/// Serialized field names match the recognition service's response shape
/// (`Name` / `Confidence`), which is also the shape stored in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Confidence")]
    pub confidence: f32,
}

impl Label {
    /// Confidence is rounded to 2 decimals at construction so stored
    /// records stay compact and comparable across reruns.
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence: (confidence * 100.0).round() / 100.0,
        }
    }
}

/// The persisted outcome of analyzing one image. `filename` is the
/// object-store key and acts as the primary key; a rerun on the same
/// filename overwrites the prior record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub filename: String,
    pub branch: String,
    pub labels: Vec<Label>,
    pub timestamp: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(filename: String, branch: String, labels: Vec<Label>) -> Self {
        Self {
            filename,
            branch,
            labels,
            timestamp: Utc::now(),
        }
    }

    /// Labels as the JSON array string stored in the table's `labels` field.
    pub fn labels_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }

    /// ISO-8601 UTC with `Z` suffix and microsecond precision.
    pub fn timestamp_iso8601(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}
