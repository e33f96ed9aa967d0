use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::error::ProxyError;
use crate::config::MAX_RESULTS;

/// Shape of the recommendation service's reply. Items are relayed untouched.
#[derive(Debug, Deserialize)]
struct UpstreamBody {
    #[serde(default)]
    recommendations: Option<Value>,
}

/// Client for the external recommendation service.
#[derive(Clone)]
pub struct Upstream {
    http_client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full GET URL for `query`. Spaces encode as `%20`, not `+`.
    pub fn request_url(&self, query: &str) -> String {
        format!(
            "{}?query={}&max_results={}",
            self.base_url,
            urlencoding::encode(query),
            MAX_RESULTS
        )
    }

    /// One attempt, no retry. Returns the raw `recommendations` value.
    pub async fn recommend(&self, query: &str) -> Result<Option<Value>, ProxyError> {
        let url = self.request_url(query);
        log::debug!("Forwarding query upstream: {url}");

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        log::debug!("Upstream replied {status}");
        if !status.is_success() {
            let status = StatusCode::from_u16(status.as_u16())
                .map_err(|e| ProxyError::Unexpected(e.to_string()))?;
            return Err(ProxyError::Upstream { status });
        }

        let bytes = response.bytes().await?;
        let body: UpstreamBody = serde_json::from_slice(&bytes)?;

        Ok(body.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_query() {
        let upstream = Upstream::new(reqwest::Client::new(), "http://upstream.test/recommend");
        assert_eq!(
            upstream.request_url("java developer"),
            "http://upstream.test/recommend?query=java%20developer&max_results=5"
        );
    }

    #[test]
    fn test_request_url_escapes_reserved_characters() {
        let upstream = Upstream::new(reqwest::Client::new(), "http://upstream.test/recommend");
        assert_eq!(
            upstream.request_url("c++ & rust?"),
            "http://upstream.test/recommend?query=c%2B%2B%20%26%20rust%3F&max_results=5"
        );
    }

    #[test]
    fn test_empty_query_still_forwarded() {
        let upstream = Upstream::new(reqwest::Client::new(), "http://upstream.test/recommend");
        assert_eq!(
            upstream.request_url(""),
            "http://upstream.test/recommend?query=&max_results=5"
        );
    }
}
