//! Local fallback endpoint, tried when the remote agent is unavailable.

use serde_json::{Value, json};

use crate::error::{CoreError, Result};

/// Client for the single `{input}` -> `{output|response}` fallback endpoint
pub struct FallbackClient {
    client: reqwest::Client,
    url: String,
}

impl FallbackClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// POST the user text; the reply is the body's `output` field, then
    /// `response`, then the raw JSON serialized back to text.
    pub async fn invoke(&self, input: &str) -> Result<String> {
        tracing::debug!(url = %self.url, "Calling fallback endpoint");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "input": input }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CoreError::Fallback(format!(
                "Fallback returned status: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        Ok(reply_text(&body))
    }
}

fn reply_text(body: &Value) -> String {
    if let Some(output) = body.get("output").and_then(Value::as_str) {
        return output.to_string();
    }
    if let Some(response) = body.get("response").and_then(Value::as_str) {
        return response.to_string();
    }
    body.to_string()
}
