//! Shared HTTP plumbing
//!
//! Sending, logging and body handling are common to every Route 53 call.
//! Signing and error-body decoding live with the client itself.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build a `reqwest` client with the default timeouts.
pub(crate) fn create_http_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .user_agent(user_agent)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP helper functions
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status, body)`.
    ///
    /// Transport failures become `Timeout` or `NetworkError`; HTTP 429 becomes
    /// `RateLimited` (with `Retry-After` when present) and 502-504 become
    /// `NetworkError` so the retry decorator picks them up. Every other status
    /// is returned for the caller to decode.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[route53] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[route53] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[route53] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                retry_after,
                raw_message: Some(body).filter(|b| !b.is_empty()),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[route53] Server error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[route53] Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Decode an XML response body.
    pub fn parse_xml<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        quick_xml::de::from_str(response_text).map_err(|e| {
            log::error!("[route53] XML parse failed: {e}");
            log::error!("[route53] Raw response: {}", truncate_for_log(response_text));
            ProviderError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Encode a request body as XML with a declaration header.
    pub fn to_xml<T>(body: &T) -> Result<String>
    where
        T: serde::Serialize,
    {
        let xml = quick_xml::se::to_string(body).map_err(|e| {
            ProviderError::SerializationError {
                detail: e.to_string(),
            }
        })?;
        Ok(format!(r#"<?xml version="1.0" encoding="UTF-8"?>{xml}"#))
    }
}
