//! Amazon Route 53 client

mod api;
mod error;
mod http;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::credentials::Route53Credentials;
use crate::error::{ProviderError, Result};
use crate::http_client::create_http_client;
use crate::retry::RetryPolicy;

/// API version path prefix
pub(crate) const API_VERSION: &str = "2013-04-01";
/// Route 53 XML namespace
pub(crate) const XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";
/// Signing service name
pub(crate) const SERVICE: &str = "route53";
/// Largest page the listings accept
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("panel-dns/", env!("CARGO_PKG_VERSION"));

/// Route 53 REST client, signed with AWS Signature Version 4.
///
/// # Construction
///
/// ```rust,no_run
/// use panel_dns_provider::{Route53Client, Route53Credentials};
///
/// let client = Route53Client::builder(Route53Credentials::new("AKIA...", "secret"))
///     .max_retries(3)
///     .build()
///     .unwrap();
/// ```
pub struct Route53Client {
    pub(crate) client: Client,
    pub(crate) credentials: Route53Credentials,
    /// Base URL without trailing slash (`https://route53.amazonaws.com`)
    pub(crate) endpoint: String,
    /// `Host` header value, port included when non-default
    pub(crate) host: String,
    pub(crate) signing_region: &'static str,
    pub(crate) retry: RetryPolicy,
}

impl std::fmt::Debug for Route53Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53Client")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint)
            .field("signing_region", &self.signing_region)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Route53Client`].
pub struct Route53ClientBuilder {
    credentials: Route53Credentials,
    endpoint: Option<String>,
    user_agent: String,
    retry: RetryPolicy,
}

impl Route53ClientBuilder {
    fn new(credentials: Route53Credentials) -> Self {
        Self {
            credentials,
            endpoint: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Override the partition endpoint (private gateways, tests).
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Caller identity sent as `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the maximum number of automatic retries for transient errors (default: 5).
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.retry.max_retries = retries;
        self
    }

    /// Build the [`Route53Client`].
    pub fn build(self) -> Result<Route53Client> {
        let partition = self.credentials.partition();
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| partition.endpoint().to_string())
            .trim_end_matches('/')
            .to_string();

        let url = Url::parse(&endpoint).map_err(|e| ProviderError::InvalidParameter {
            param: "endpoint".to_string(),
            detail: format!("{endpoint}: {e}"),
        })?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(ProviderError::InvalidParameter {
                    param: "endpoint".to_string(),
                    detail: format!("{endpoint}: missing host"),
                });
            }
        };

        Ok(Route53Client {
            client: create_http_client(&self.user_agent)?,
            credentials: self.credentials,
            endpoint,
            host,
            signing_region: partition.signing_region(),
            retry: self.retry,
        })
    }
}

impl Route53Client {
    /// Client with default settings (partition endpoint, 5 retries).
    pub fn new(credentials: Route53Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Builder for customizing the client.
    pub fn builder(credentials: Route53Credentials) -> Route53ClientBuilder {
        Route53ClientBuilder::new(credentials)
    }
}
