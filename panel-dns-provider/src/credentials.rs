//! Stored Route 53 credentials and region handling.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Regions accepted in stored credentials.
pub const REGIONS: &[&str] = &[
    "us-west-2",
    "us-west-1",
    "us-east-2",
    "us-east-1",
    "ap-south-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ca-central-1",
    "cn-north-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "sa-east-1",
    "us-gov-west-1",
];

/// Region used when the stored credentials carry none.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Validation error for stored credentials. Raised before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required field is missing entirely.
    #[error("Route 53 key must provide both key and secret (missing `{field}')")]
    MissingField {
        /// Machine-readable field key.
        field: String,
    },
    /// A required field is present but blank.
    #[error("Field must not be empty: {field}")]
    EmptyField {
        /// Machine-readable field key.
        field: String,
    },
    /// The region is not in [`REGIONS`].
    #[error("Unknown Route 53 region `{region}'")]
    UnknownRegion {
        /// The rejected region.
        region: String,
    },
    /// The session credentials have already expired.
    #[error("Session credentials expired at {expires}")]
    Expired {
        /// Expiry instant.
        expires: DateTime<Utc>,
    },
    /// A field has an unparseable value.
    #[error("{field}: {reason}")]
    InvalidFormat {
        /// Machine-readable field key.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Key/secret pair (plus optional session token) as the panel stores it.
///
/// ```json
/// { "key": "AKIA...", "secret": "...", "region": "us-east-1" }
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route53Credentials {
    /// Access key id.
    pub key: String,
    /// Secret access key.
    pub secret: String,
    /// Session token for temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Expiry of temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// One of [`REGIONS`]; [`DEFAULT_REGION`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl std::fmt::Debug for Route53Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53Credentials")
            .field("key", &crate::utils::log_sanitizer::mask_secret(&self.key))
            .field("secret", &"***")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("expires", &self.expires)
            .field("region", &self.region)
            .finish()
    }
}

impl Route53Credentials {
    /// Plain key/secret credentials with the default region.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            token: None,
            expires: None,
            region: None,
        }
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Attach a session token and its expiry.
    #[must_use]
    pub fn with_session(mut self, token: impl Into<String>, expires: Option<DateTime<Utc>>) -> Self {
        self.token = Some(token.into());
        self.expires = expires;
        self
    }

    /// Build credentials from a flat key-value map (`key`, `secret`, `token`,
    /// `expires` as RFC 3339, `region`).
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        let required = |field: &str| {
            map.get(field)
                .cloned()
                .ok_or_else(|| CredentialValidationError::MissingField {
                    field: field.to_string(),
                })
        };

        let expires = map
            .get("expires")
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                DateTime::parse_from_rfc3339(v.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| CredentialValidationError::InvalidFormat {
                        field: "expires".to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self {
            key: required("key")?,
            secret: required("secret")?,
            token: map.get("token").filter(|v| !v.is_empty()).cloned(),
            expires,
            region: map.get("region").filter(|v| !v.is_empty()).cloned(),
        })
    }

    /// Check the fields locally and fill in the default region.
    pub fn validated(mut self) -> Result<Self, CredentialValidationError> {
        for (field, value) in [("key", &self.key), ("secret", &self.secret)] {
            if value.trim().is_empty() {
                return Err(CredentialValidationError::EmptyField {
                    field: field.to_string(),
                });
            }
        }

        let region = self
            .region
            .take()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        if !REGIONS.contains(&region.as_str()) {
            return Err(CredentialValidationError::UnknownRegion { region });
        }
        self.region = Some(region);

        if let Some(expires) = self.expires
            && expires <= Utc::now()
        {
            return Err(CredentialValidationError::Expired { expires });
        }

        Ok(self)
    }

    /// Effective region.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// API partition the region belongs to.
    pub fn partition(&self) -> Partition {
        Partition::for_region(self.region())
    }
}

/// Route 53 is a global service; each AWS partition has a single endpoint and
/// signing region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Commercial regions.
    Aws,
    /// China regions.
    China,
    /// `GovCloud` regions.
    GovCloud,
}

impl Partition {
    /// Partition for a region name.
    pub fn for_region(region: &str) -> Self {
        if region.starts_with("cn-") {
            Self::China
        } else if region.starts_with("us-gov-") {
            Self::GovCloud
        } else {
            Self::Aws
        }
    }

    /// HTTPS endpoint of the Route 53 API.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Aws => "https://route53.amazonaws.com",
            Self::China => "https://route53.amazonaws.com.cn",
            Self::GovCloud => "https://route53.us-gov.amazonaws.com",
        }
    }

    /// Region used in the `SigV4` credential scope.
    pub fn signing_region(self) -> &'static str {
        match self {
            Self::Aws => "us-east-1",
            Self::China => "cn-northwest-1",
            Self::GovCloud => "us-gov-west-1",
        }
    }
}
