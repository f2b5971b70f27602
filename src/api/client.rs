//! HTTP client construction and response classification
//!
//! Every upstream call funnels through [`fetch_json`], which maps the HTTP
//! outcome onto [`FetchError`]:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | HTTP 404 | `NotFound` |
//! | Other non-2xx | `Upstream` with status |
//! | Timeout / connection failure | `Upstream` without status |
//! | 2xx with empty or `null` body | `ResponseEmpty` |
//! | 2xx with undecodable body | `Upstream` with status |

use crate::api::{FetchError, FetchResult};
use crate::config::ApiConfig;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use squad_scout::api::build_http_client;
/// use squad_scout::config::ApiConfig;
///
/// let config = ApiConfig {
///     base_url: "https://api-public.cs-prod.leetify.com".to_string(),
///     api_key: "key".to_string(),
///     user_agent: "squad-scout/1.0".to_string(),
///     banned_list_url: "https://vaclist.net/api/banned".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a request and decodes a JSON body
///
/// `key` names the requested entity in `NotFound` and `ResponseEmpty` errors.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    key: &str,
) -> FetchResult<T> {
    let response = request.send().await.map_err(classify_transport_error)?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(key.to_string()));
    }

    if !status.is_success() {
        return Err(FetchError::Upstream {
            status: Some(status.as_u16()),
            message: format!("HTTP {} for {}", status.as_u16(), key),
        });
    }

    let body = response.text().await.map_err(classify_transport_error)?;
    decode_body(&body, status, key)
}

fn decode_body<T: DeserializeOwned>(body: &str, status: StatusCode, key: &str) -> FetchResult<T> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(FetchError::ResponseEmpty(key.to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| FetchError::Upstream {
        status: Some(status.as_u16()),
        message: format!("Malformed body for {}: {}", key, e),
    })
}

fn classify_transport_error(e: reqwest::Error) -> FetchError {
    let message = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };

    FetchError::Upstream {
        status: None,
        message,
    }
}
