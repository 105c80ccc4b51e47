//! In-memory object store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::{CoreError, Result};
use crate::object_store::{ObjectStore, RemoteObject};

#[derive(Default)]
struct MockState {
    objects: Vec<RemoteObject>,
    contents: HashMap<String, String>,
    listing_error: Option<String>,
}

/// Object store backed by a plain vector; listings filter by prefix. Clones
/// share state, so a test can keep a handle after handing one to `AppCore`.
#[derive(Default, Clone)]
pub struct MockObjectStore {
    state: Arc<Mutex<MockState>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the listing and its content to the body map
    pub fn put(
        &self,
        key: &str,
        content: &str,
        size: Option<u64>,
        last_modified: Option<DateTime<Utc>>,
    ) {
        let mut state = self.state.lock();
        state.objects.push(RemoteObject {
            key: key.to_string(),
            size,
            last_modified,
        });
        state.contents.insert(key.to_string(), content.to_string());
    }

    /// Replace an object's modification time in the listing
    pub fn set_last_modified(&self, key: &str, last_modified: DateTime<Utc>) {
        let mut state = self.state.lock();
        if let Some(object) = state.objects.iter_mut().find(|o| o.key == key) {
            object.last_modified = Some(last_modified);
        }
    }

    /// Make every subsequent listing fail with the given reason
    pub fn fail_listings(&self, message: &str) {
        self.state.lock().listing_error = Some(message.to_string());
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<RemoteObject>> {
        let state = self.state.lock();
        if let Some(message) = &state.listing_error {
            return Err(CoreError::ObjectStore(message.clone()));
        }
        Ok(state
            .objects
            .iter()
            .filter(|o| o.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get(&self, key: &str) -> Result<String> {
        self.state
            .lock()
            .contents
            .get(key)
            .cloned()
            .ok_or_else(|| CoreError::ObjectStore(format!("Object '{}' not found", key)))
    }
}
