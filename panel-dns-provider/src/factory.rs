//! Client factory.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::credentials::Route53Credentials;
use crate::error::{ProviderError, Result};
use crate::retry::RetryPolicy;
use crate::route53::{DEFAULT_USER_AGENT, Route53Client};
use crate::traits::Route53Api;

/// Knobs for [`create_client`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    /// Caller identity sent as `User-Agent`.
    pub user_agent: String,
    /// Transient-error retry policy.
    #[serde(skip)]
    pub retry: RetryPolicy,
    /// Endpoint override (private gateways, tests). The partition endpoint otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
            endpoint: None,
        }
    }
}

/// Creates a signed Route 53 client from stored credentials.
///
/// The credentials are validated locally first (non-blank key and secret,
/// known region, not expired); no remote call is made here.
///
/// # Examples
///
/// ```rust,no_run
/// use panel_dns_provider::{create_client, ClientOptions, Route53Credentials};
///
/// let client = create_client(
///     Route53Credentials::new("AKIA...", "secret").with_region("eu-west-1"),
///     &ClientOptions::default(),
/// ).unwrap();
/// ```
pub fn create_client(
    credentials: Route53Credentials,
    options: &ClientOptions,
) -> Result<Arc<dyn Route53Api>> {
    let credentials = credentials
        .validated()
        .map_err(|e| ProviderError::InvalidParameter {
            param: "credentials".to_string(),
            detail: e.to_string(),
        })?;

    log::debug!(
        "[route53] Creating client for {credentials:?} ({})",
        options.user_agent
    );

    let mut builder = Route53Client::builder(credentials)
        .user_agent(options.user_agent.clone())
        .retry(options.retry);
    if let Some(endpoint) = &options.endpoint {
        builder = builder.endpoint(endpoint.clone());
    }

    Ok(Arc::new(builder.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_region() {
        let result = create_client(
            Route53Credentials::new("AKIA", "secret").with_region("moon-1"),
            &ClientOptions::default(),
        );
        assert!(matches!(
            result,
            Err(ProviderError::InvalidParameter { ref detail, .. }) if detail.contains("moon-1")
        ));
    }

    #[test]
    fn builds_with_defaults() {
        assert!(create_client(Route53Credentials::new("AKIA", "secret"), &ClientOptions::default()).is_ok());
    }

    #[test]
    fn default_user_agent_names_crate() {
        assert!(ClientOptions::default().user_agent.starts_with("panel-dns/"));
    }
}
