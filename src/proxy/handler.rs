use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{error::ProxyError, ProxyState};

/// Successful reply: the upstream list under `results`, untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
}

/// Pull a string `query` out of a raw JSON body.
///
/// A body that is not JSON at all is an unexpected failure; a JSON body
/// without a string `query` is a client error.
pub fn extract_query(body: &[u8]) -> Result<String, ProxyError> {
    let payload: Value = serde_json::from_slice(body)?;

    payload
        .get("query")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ProxyError::InvalidQuery)
}

pub async fn recommend_handler(
    State(state): State<ProxyState>,
    body: Bytes,
) -> Result<Json<RecommendResponse>, ProxyError> {
    let query = extract_query(&body)?;
    log::info!("Recommendation request for {query:?}");

    let results = state.upstream.recommend(&query).await?;

    Ok(Json(RecommendResponse { results }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
