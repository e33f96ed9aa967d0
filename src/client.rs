use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::model::Recommendation;

pub const FALLBACK_API_ERROR: &str = "Failed to fetch results";
pub const FALLBACK_ERROR: &str = "An error occurred while fetching data";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status; shown verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Text for the error banner, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Convert items one at a time so a single malformed entry only costs itself.
pub fn decode_results(items: Vec<Value>) -> Vec<Recommendation> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value(item) {
            Ok(recommendation) => Some(recommendation),
            Err(e) => {
                log::warn!("Skipping result {position}: {e}");
                None
            }
        })
        .collect()
}

/// Talks to the proxy's recommend route on behalf of the search view.
#[derive(Clone)]
pub struct SearchClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `{"query": query}` once and decode the reply.
    pub async fn search(&self, query: &str) -> Result<Vec<Recommendation>, ClientError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        // The body is decoded before the status is looked at, so a non-JSON
        // error page surfaces as a decode error.
        let payload: Value = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(FALLBACK_API_ERROR)
                .to_string();
            log::warn!("Proxy returned {status}: {message}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SuccessBody = serde_json::from_value(payload)?;
        Ok(decode_results(body.results.unwrap_or_default()))
    }
}
