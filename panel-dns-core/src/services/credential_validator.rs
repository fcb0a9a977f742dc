//! Stored key validation

use std::collections::HashMap;
use std::sync::Arc;

use panel_dns_provider::Route53Credentials;

use crate::error::{CoreError, CoreResult};
use crate::traits::ClientFactory;

/// Checks a key before the panel stores it.
pub struct CredentialValidator {
    factory: Arc<dyn ClientFactory>,
}

impl CredentialValidator {
    #[must_use]
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }

    /// Validate the panel's flat service value (`key`, `secret`, `region`, ...).
    ///
    /// Returns the credentials with the default region filled in.
    pub async fn valid(&self, value: &HashMap<String, String>) -> CoreResult<Route53Credentials> {
        let credentials = Route53Credentials::from_map(value)?.validated()?;
        self.key_valid(credentials.clone()).await?;
        Ok(credentials)
    }

    /// One read-only `GetHostedZoneCount` with the key.
    pub async fn key_valid(&self, credentials: Route53Credentials) -> CoreResult<()> {
        let api = self.factory.create(credentials).map_err(|e| match e {
            CoreError::Provider(p) => CoreError::InvalidCredentials(p.provider_message()),
            other => other,
        })?;

        match api.get_hosted_zone_count().await {
            Ok(count) => {
                log::debug!("[route53] Key valid, {count} hosted zone(s)");
                Ok(())
            }
            Err(e) => {
                log::warn!("[route53] Key check failed: {e}");
                Err(CoreError::InvalidCredentials(e.provider_message()))
            }
        }
    }
}
