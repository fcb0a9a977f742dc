//! Route 53 HTTP request methods

use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::retry::{is_retryable, with_retry};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::sign::canonical_query;
use super::types::{ErrorResponse, InvalidChangeBatchResponse};
use super::{API_VERSION, Route53Client};

impl Route53Client {
    // ==================== Helpers ====================

    /// Decode a non-2xx response into a [`ProviderError`](crate::ProviderError).
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        if let Ok(error) = quick_xml::de::from_str::<ErrorResponse>(response_text) {
            return Err(self.map_error(
                RawApiError::with_code(
                    status,
                    error.error.code.unwrap_or_default(),
                    error.error.message.unwrap_or_default(),
                ),
                ctx,
            ));
        }

        if response_text.contains("<InvalidChangeBatch") {
            let batch: InvalidChangeBatchResponse = quick_xml::de::from_str(response_text)
                .map_err(|e| self.parse_error(e))?;
            return Err(crate::ProviderError::InvalidChangeBatch {
                messages: batch.messages.items,
            });
        }

        Err(self.map_error(
            RawApiError::new(
                status,
                format!("HTTP {status}: {}", truncate_for_log(response_text)),
            ),
            ctx,
        ))
    }

    /// One signed attempt.
    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        query: &str,
        payload: &str,
    ) -> Result<(u16, String)> {
        let signed = self.sign(method.as_str(), path, query, payload, Utc::now())?;

        let url = if query.is_empty() {
            format!("{}{path}", self.endpoint)
        } else {
            format!("{}{path}?{query}", self.endpoint)
        };

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Host", &self.host)
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", signed.authorization);
        if let Some(token) = &self.credentials.token {
            request = request.header("X-Amz-Security-Token", token.trim());
        }
        if !payload.is_empty() {
            request = request
                .header("Content-Type", "application/xml")
                .body(payload.to_string());
        }

        HttpUtils::execute_request(request, method.as_str(), &url).await
    }

    /// Send with retries and decode the response.
    ///
    /// `path` is relative to the API version (`/hostedzone`); every attempt is
    /// signed again.
    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: &str,
        ctx: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = format!("/{API_VERSION}{path}");
        let query = canonical_query(query);
        let label = format!("{method} {path}");
        let (method, path, query, ctx) = (&method, &path, &query, &ctx);

        let (status, response_text) = with_retry(&self.retry, &label, is_retryable, || async move {
            let (status, text) = self.send_once(method, path, query, payload).await?;
            self.handle_response_error(status, &text, ctx.clone())?;
            Ok((status, text))
        })
        .await?;

        log::debug!("[route53] {label} -> {status}");
        HttpUtils::parse_xml(&response_text)
    }

    // ==================== Public API methods ====================

    /// Execute GET request
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<T> {
        self.send(Method::GET, path, query, "", ctx).await
    }

    /// Execute POST request with an XML body
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B, ctx: ErrorContext) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let payload = HttpUtils::to_xml(body)?;
        log::debug!("[route53] Request Body: {}", truncate_for_log(&payload));
        self.send(Method::POST, path, &[], &payload, ctx).await
    }

    /// Execute DELETE request
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        self.send(Method::DELETE, path, &[], "", ctx).await
    }
}
