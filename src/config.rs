use std::{env, fmt::Display, str::FromStr};

use crate::error::{AppError, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://vishalpainjane-shl-assignment.hf.space/recommend";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/recommend";

/// Result cap sent upstream with every query.
pub const MAX_RESULTS: u32 = 5;

pub const PORT_VAR: &str = "SOLUTION_FINDER_PORT";
pub const UPSTREAM_VAR: &str = "SOLUTION_FINDER_UPSTREAM_URL";
pub const ENDPOINT_VAR: &str = "SOLUTION_FINDER_ENDPOINT";
pub const LOG_FILE_VAR: &str = "SOLUTION_FINDER_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub port: u16,
    pub upstream_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the proxy's recommend route.
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub proxy: ProxyConfig,
    pub client: ClientConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Read settings from the environment, falling back to defaults.
    pub fn load() -> Result<Self> {
        Ok(Self {
            proxy: ProxyConfig {
                port: try_load(PORT_VAR, &DEFAULT_PORT.to_string())?,
                upstream_url: try_load(UPSTREAM_VAR, DEFAULT_UPSTREAM_URL)?,
            },
            client: ClientConfig {
                endpoint: try_load(ENDPOINT_VAR, DEFAULT_ENDPOINT)?,
            },
        })
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.proxy.port = port;
        }
        self
    }

    pub fn with_upstream(mut self, upstream_url: Option<String>) -> Self {
        if let Some(url) = upstream_url {
            self.proxy.upstream_url = url;
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.client.endpoint = endpoint;
        }
        self
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        log::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        log::warn!("Invalid {key} value: {e}");
        AppError::Config(format!("invalid {key} value '{raw}': {e}"))
    })
}
