//! HTTP gateway implementation of the object store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{CoreError, Result};
use crate::object_store::{ObjectStore, RemoteObject};

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    objects: Vec<ListedObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedObject {
    key: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
}

/// Object store speaking a plain JSON gateway:
/// `GET {base}/{bucket}?prefix=` for listings, `GET {base}/{bucket}/{key}`
/// for bodies.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<RemoteObject>> {
        let url = format!("{}/{}", self.base_url, self.bucket);
        let response = self
            .client
            .get(&url)
            .query(&[("prefix", prefix)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CoreError::ObjectStore(format!(
                "Listing returned status: {}",
                response.status()
            )));
        }

        let listing: ListingResponse = response.json().await?;
        Ok(listing
            .objects
            .into_iter()
            .map(|o| RemoteObject {
                key: o.key,
                size: o.size,
                last_modified: o.last_modified,
            })
            .collect())
    }

    async fn get(&self, key: &str) -> Result<String> {
        let url = format!("{}/{}/{}", self.base_url, self.bucket, key);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CoreError::ObjectStore(format!(
                "Object '{}' returned status: {}",
                key,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_parses_the_gateway_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reports-bucket"))
            .and(query_param("prefix", "BRD_"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [
                    { "key": "BRD_one.md", "size": 2048, "lastModified": "2025-03-01T12:00:00Z" },
                    { "key": "BRD_two.md" }
                ]
            })))
            .mount(&server)
            .await;

        let store = HttpObjectStore::new(server.uri(), "reports-bucket");
        let objects = store.list("BRD_").await.expect("listing should succeed");

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].key, "BRD_one.md");
        assert_eq!(objects[0].size, Some(2048));
        assert!(objects[0].last_modified.is_some());
        assert!(objects[1].size.is_none());
    }

    #[tokio::test]
    async fn get_returns_the_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reports-bucket/BRD_one.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Report body"))
            .mount(&server)
            .await;

        let store = HttpObjectStore::new(server.uri(), "reports-bucket");
        let body = store.get("BRD_one.md").await.expect("get should succeed");
        assert_eq!(body, "# Report body");
    }

    #[tokio::test]
    async fn failures_surface_as_object_store_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let store = HttpObjectStore::new(server.uri(), "reports-bucket");
        let err = store.list("BRD_").await.expect_err("listing should fail");
        assert!(matches!(err, CoreError::ObjectStore(_)));
    }
}
