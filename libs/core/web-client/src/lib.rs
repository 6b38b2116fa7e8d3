//! Outbound HTTP helper for calling other services.
//!
//! Every call returns the response body as text, whatever the status code.
//! Failures are soft:
//!
//! - an empty or unusable URL, bad headers or an unserializable payload give
//!   `None` and nothing is sent
//! - a transport failure gives `Some("Request failed: <reason>")`
//!
//! ```rust,no_run
//! use web_client::WebClient;
//!
//! # async fn example() {
//! let client = WebClient::new();
//! let body = client.get("http://inventory:8080/Widget", None, None).await;
//! # }
//! ```

use http::HeaderMap;
use reqwest::{
    Method, Url,
    header::{HeaderName, HeaderValue},
};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Connect timeout used when a call does not pass one.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Prefix of the body returned when the transport fails.
pub const REQUEST_FAILED_PREFIX: &str = "Request failed: ";

/// `Content-Type` and `Accept` set to `application/json`.
pub fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

/// Copy inbound request headers into a plain map for forwarding.
///
/// Only the first value of a repeated header is kept; values that are not
/// valid UTF-8 are skipped.
pub fn headers_from_request(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            map.entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    map
}

/// Stateless JSON-over-HTTP caller. A fresh client is built per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClient;

impl WebClient {
    pub fn new() -> Self {
        Self
    }

    pub async fn get(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        timeout_ms: Option<u64>,
    ) -> Option<String> {
        self.send(Method::GET, url, None, headers, timeout_ms).await
    }

    pub async fn delete(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
        timeout_ms: Option<u64>,
    ) -> Option<String> {
        self.send(Method::DELETE, url, None, headers, timeout_ms)
            .await
    }

    /// POST `payload` serialized as JSON text.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        headers: Option<&HashMap<String, String>>,
        timeout_ms: Option<u64>,
    ) -> Option<String> {
        let body = serialize_payload(payload)?;
        self.send(Method::POST, url, Some(body), headers, timeout_ms)
            .await
    }

    /// PUT `payload` serialized as JSON text.
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        headers: Option<&HashMap<String, String>>,
        timeout_ms: Option<u64>,
    ) -> Option<String> {
        let body = serialize_payload(payload)?;
        self.send(Method::PUT, url, Some(body), headers, timeout_ms)
            .await
    }

    #[instrument(skip(self, body, headers))]
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        headers: Option<&HashMap<String, String>>,
        timeout_ms: Option<u64>,
    ) -> Option<String> {
        if url.is_empty() {
            error!("Outbound {} skipped: URL is empty", method);
            return None;
        }

        let parsed_url = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(error = %e, "Outbound {} skipped: invalid URL", method);
                return None;
            }
        };

        let header_map = build_header_map(headers)?;
        let timeout = Duration::from_millis(timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS));

        let client = match reqwest::Client::builder().connect_timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client");
                return None;
            }
        };

        let mut request = client.request(method, parsed_url).headers(header_map);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Outbound request failed");
                return Some(format!("{REQUEST_FAILED_PREFIX}{e}"));
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(text) => {
                info!(status = status.as_u16(), body = %text, "Outbound request completed");
                Some(text)
            }
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read response body");
                Some(format!("{REQUEST_FAILED_PREFIX}{e}"))
            }
        }
    }
}

fn serialize_payload<T: Serialize + ?Sized>(payload: &T) -> Option<String> {
    match serde_json::to_string(payload) {
        Ok(body) => Some(body),
        Err(e) => {
            error!(error = %e, "Failed to serialize request payload");
            None
        }
    }
}

/// `None` or an empty map falls back to [`default_headers`].
fn build_header_map(headers: Option<&HashMap<String, String>>) -> Option<HeaderMap> {
    let defaults;
    let source = match headers {
        Some(h) if !h.is_empty() => h,
        _ => {
            defaults = default_headers();
            &defaults
        }
    };

    let mut map = HeaderMap::with_capacity(source.len());
    for (name, value) in source {
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                error!(header = %name, error = %e, "Invalid header name");
                return None;
            }
        };
        let value = match HeaderValue::from_str(value) {
            Ok(value) => value,
            Err(e) => {
                error!(header = %name, error = %e, "Invalid header value");
                return None;
            }
        };
        map.insert(name, value);
    }
    Some(map)
}
