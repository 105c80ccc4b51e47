//! Report metadata pointing at a document in the remote object store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report record; only `last_modified` is ever updated after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Remote object key, unique across the report set
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(title: impl Into<String>, storage_key: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            storage_key: storage_key.into(),
            size_label: None,
            last_modified: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_size_label(mut self, size_label: impl Into<String>) -> Self {
        self.size_label = Some(size_label.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Timestamp used for recency ordering: modification time when known,
    /// creation time otherwise.
    pub fn modified_or_created(&self) -> DateTime<Utc> {
        self.last_modified.unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn recency_falls_back_to_creation_time() {
        let report = Report::new("BRD_a.md", "BRD_a.md");
        assert_eq!(report.modified_or_created(), report.created_at);

        let modified = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let report = report.with_last_modified(modified);
        assert_eq!(report.modified_or_created(), modified);
    }
}
