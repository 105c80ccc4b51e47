//! Remote report object store: list by prefix, get by key.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use http::HttpObjectStore;
pub use mock::MockObjectStore;

/// Entry in a remote object listing
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub key: String,
    pub size: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Remote key/value object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List objects whose keys start with the given prefix
    async fn list(&self, prefix: &str) -> Result<Vec<RemoteObject>>;

    /// Fetch an object body as text
    async fn get(&self, key: &str) -> Result<String>;
}
