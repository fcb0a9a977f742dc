//! Route 53 client construction

use std::sync::Arc;

use panel_dns_provider::{ClientOptions, Route53Api, Route53Credentials, create_client};

use crate::error::CoreResult;

/// Builds an authenticated [`Route53Api`] from stored credentials.
///
/// The default [`HttpClientFactory`] talks to Route 53; tests inject doubles.
pub trait ClientFactory: Send + Sync {
    fn create(&self, credentials: Route53Credentials) -> CoreResult<Arc<dyn Route53Api>>;
}

/// Signed HTTP client factory.
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    options: ClientOptions,
}

impl HttpClientFactory {
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, credentials: Route53Credentials) -> CoreResult<Arc<dyn Route53Api>> {
        Ok(create_client(credentials, &self.options)?)
    }
}
