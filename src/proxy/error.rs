use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INVALID_QUERY_MESSAGE: &str = "Query parameter is required and must be a string";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch recommendations";
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Failed to process request";

/// JSON body of every non-success reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Query parameter is required and must be a string")]
    InvalidQuery,

    #[error("Failed to fetch recommendations: API returned status {}", .status.as_u16())]
    Upstream { status: StatusCode },

    #[error("Failed to process request: {0}")]
    Unexpected(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidQuery => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status } => *status,
            ProxyError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ProxyError::InvalidQuery => ErrorBody {
                error: INVALID_QUERY_MESSAGE.to_string(),
                details: None,
            },
            ProxyError::Upstream { status } => ErrorBody {
                error: UPSTREAM_FAILURE_MESSAGE.to_string(),
                details: Some(format!("API returned status {}", status.as_u16())),
            },
            ProxyError::Unexpected(details) => ErrorBody {
                error: UNEXPECTED_FAILURE_MESSAGE.to_string(),
                details: Some(details.clone()),
            },
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        ProxyError::Unexpected(error.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(error: serde_json::Error) -> Self {
        ProxyError::Unexpected(error.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        log::error!("Error in recommendation API: {self}");

        (self.status(), Json(self.body())).into_response()
    }
}
