//! Report synchronization against the remote object store.

use std::sync::Arc;

use crate::AppCore;
use crate::error::{CoreError, Result};
use crate::models::Report;
use crate::object_store::RemoteObject;

/// Reconcile the remote listing against stored reports and return the set,
/// most recently modified first. A failed listing is logged and the
/// previously known set returned; stale data is preferred over a hard
/// failure.
pub async fn sync(core: &Arc<AppCore>) -> Vec<Report> {
    match core.object_store.list(&core.config.reports_prefix).await {
        Ok(objects) => {
            tracing::debug!("Found {} remote report objects", objects.len());
            for object in &objects {
                reconcile(core, object);
            }
        }
        Err(e) => {
            tracing::warn!("Could not sync with report storage: {}", e);
        }
    }

    core.storage.reports.list_recent_first()
}

fn reconcile(core: &AppCore, object: &RemoteObject) {
    if !object.key.starts_with(&core.config.reports_prefix) || !object.key.ends_with(".md") {
        return;
    }

    match core.storage.reports.find_by_key(&object.key) {
        None => {
            let title = object.key.rsplit('/').next().unwrap_or(&object.key);
            tracing::debug!(key = %object.key, "Creating report entry for remote object");

            let mut report =
                Report::new(title, &object.key).with_description("Report from remote storage");
            if let Some(size) = object.size {
                report = report.with_size_label(size_label(size));
            }
            if let Some(modified) = object.last_modified {
                report = report.with_last_modified(modified);
            }
            core.storage.reports.create(report);
        }
        Some(existing) => {
            let Some(remote_modified) = object.last_modified else {
                return;
            };
            let is_newer = existing
                .last_modified
                .is_none_or(|stored| remote_modified > stored);
            if is_newer {
                tracing::debug!(key = %object.key, "Refreshing report modification time");
                core.storage
                    .reports
                    .set_last_modified(&existing.id, remote_modified);
            }
        }
    }
}

/// Rounded kilobyte label for a listing entry
fn size_label(size: u64) -> String {
    format!("{} KB", (size + 512) / 1024)
}

/// Fetch a report and its body from the remote store.
pub async fn content(core: &Arc<AppCore>, id: &str) -> Result<(Report, String)> {
    let report = core
        .storage
        .reports
        .get(id)
        .ok_or_else(|| CoreError::ReportNotFound(id.to_string()))?;
    let body = core.object_store.get(&report.storage_key).await?;
    Ok((report, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::MockAgentClient;
    use crate::object_store::MockObjectStore;
    use crate::{Config, test_core};
    use chrono::{TimeZone, Utc};

    fn core_with_reports(store: MockObjectStore) -> Arc<AppCore> {
        test_core(MockAgentClient::replying(&["unused"]), store, Config::default())
    }

    #[tokio::test]
    async fn sync_creates_entries_for_remote_objects() {
        let remote = MockObjectStore::new();
        let modified = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        remote.put("BRD_alpha.md", "# Alpha", Some(2048), Some(modified));
        let core = core_with_reports(remote);

        let reports = sync(&core).await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].title, "BRD_alpha.md");
        assert_eq!(reports[0].storage_key, "BRD_alpha.md");
        assert_eq!(reports[0].size_label.as_deref(), Some("2 KB"));
        assert_eq!(reports[0].last_modified, Some(modified));
    }

    #[tokio::test]
    async fn sync_is_idempotent_on_storage_key() {
        let remote = MockObjectStore::new();
        remote.put("BRD_alpha.md", "# Alpha", Some(1024), None);
        let core = core_with_reports(remote);

        sync(&core).await;
        let reports = sync(&core).await;

        assert_eq!(reports.len(), 1);
    }

    #[tokio::test]
    async fn sync_refreshes_only_the_modification_time() {
        let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        let remote = MockObjectStore::new();
        remote.put("BRD_x.md", "# X", Some(2048), Some(t1));
        let core = core_with_reports(remote.clone());

        sync(&core).await;
        remote.set_last_modified("BRD_x.md", t2);
        let reports = sync(&core).await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].last_modified, Some(t2));
        assert_eq!(reports[0].title, "BRD_x.md");
        assert_eq!(
            reports[0].description.as_deref(),
            Some("Report from remote storage")
        );
    }

    #[tokio::test]
    async fn sync_skips_objects_outside_the_naming_convention() {
        let remote = MockObjectStore::new();
        remote.put("BRD_notes.txt", "notes", None, None);
        remote.put("BRD_real.md", "# Real", None, None);
        let core = core_with_reports(remote);

        let reports = sync(&core).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].storage_key, "BRD_real.md");
    }

    #[tokio::test]
    async fn failed_listing_returns_the_stale_set() {
        let remote = MockObjectStore::new();
        remote.put("BRD_kept.md", "# Kept", None, None);
        let core = core_with_reports(remote.clone());

        sync(&core).await;

        remote.fail_listings("storage offline");
        let reports = sync(&core).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].storage_key, "BRD_kept.md");
    }

    #[tokio::test]
    async fn content_returns_report_and_body() {
        let remote = MockObjectStore::new();
        remote.put("BRD_alpha.md", "# Alpha body", None, None);
        let core = core_with_reports(remote);

        let reports = sync(&core).await;
        let (report, body) = content(&core, &reports[0].id)
            .await
            .expect("content should resolve");

        assert_eq!(report.storage_key, "BRD_alpha.md");
        assert_eq!(body, "# Alpha body");
    }

    #[tokio::test]
    async fn content_rejects_unknown_id() {
        let core = core_with_reports(MockObjectStore::new());
        let err = content(&core, "no-such-id")
            .await
            .expect_err("unknown id should fail");
        assert!(matches!(err, CoreError::ReportNotFound(_)));
    }

    #[test]
    fn size_label_rounds_to_kilobytes() {
        assert_eq!(size_label(2048), "2 KB");
        assert_eq!(size_label(1400), "1 KB");
        assert_eq!(size_label(1600), "2 KB");
        assert_eq!(size_label(100), "0 KB");
    }
}
