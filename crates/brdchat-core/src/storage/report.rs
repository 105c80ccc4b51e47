//! Report store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::models::Report;

/// In-memory report store keyed by report id. Reconciliation against the
/// remote listing goes through `find_by_key`, a linear scan over the set.
#[derive(Default)]
pub struct ReportStore {
    reports: RwLock<HashMap<String, Report>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, report: Report) -> Report {
        self.reports
            .write()
            .insert(report.id.clone(), report.clone());
        report
    }

    pub fn get(&self, id: &str) -> Option<Report> {
        self.reports.read().get(id).cloned()
    }

    /// Look up a report by its remote storage key
    pub fn find_by_key(&self, storage_key: &str) -> Option<Report> {
        self.reports
            .read()
            .values()
            .find(|r| r.storage_key == storage_key)
            .cloned()
    }

    /// Refresh the modification timestamp, leaving every other field intact
    pub fn set_last_modified(&self, id: &str, last_modified: DateTime<Utc>) -> Option<Report> {
        let mut reports = self.reports.write();
        let report = reports.get_mut(id)?;
        report.last_modified = Some(last_modified);
        Some(report.clone())
    }

    /// All reports, most recently modified (or created) first
    pub fn list_recent_first(&self) -> Vec<Report> {
        let mut reports: Vec<Report> = self.reports.read().values().cloned().collect();
        reports.sort_by(|a, b| b.modified_or_created().cmp(&a.modified_or_created()));
        reports
    }
}
