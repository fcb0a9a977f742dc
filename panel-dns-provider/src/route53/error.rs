//! Route 53 error mapping
//!
//! Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Client;

/// Throttling shows up as HTTP 400 with one of these codes, or with this text.
const THROTTLE_CODES: &[&str] = &["Throttling", "ThrottlingException", "PriorRequestNotComplete"];
const THROTTLE_MESSAGE: &str = "Rate exceeded";

impl ProviderErrorMapper for Route53Client {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        if raw.message.contains(THROTTLE_MESSAGE)
            || raw
                .code
                .as_deref()
                .is_some_and(|code| THROTTLE_CODES.contains(&code))
        {
            return ProviderError::RateLimited {
                retry_after: None,
                raw_message: Some(raw.message),
            };
        }

        let zone = || context.zone.clone().unwrap_or_default();

        match raw.code.as_deref() {
            // ============ Authentication ============
            Some(
                "InvalidClientTokenId"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature"
                | "ExpiredToken"
                | "MissingAuthenticationToken"
                | "UnrecognizedClientException",
            ) => ProviderError::InvalidCredentials {
                raw_message: Some(raw.message),
            },

            // ============ Authorization ============
            Some("AccessDenied" | "AccessDeniedException") => ProviderError::PermissionDenied {
                raw_message: Some(raw.message),
            },

            // ============ Zones ============
            Some("NoSuchHostedZone") => ProviderError::ZoneNotFound {
                zone: zone(),
                raw_message: Some(raw.message),
            },
            Some("HostedZoneAlreadyExists" | "ConflictingDomainExists") => {
                ProviderError::ZoneExists {
                    zone: zone(),
                    raw_message: Some(raw.message),
                }
            }
            Some("HostedZoneNotEmpty") => ProviderError::ZoneNotEmpty {
                zone: zone(),
                raw_message: Some(raw.message),
            },

            // ============ Changes ============
            Some("InvalidChangeBatch") => ProviderError::InvalidChangeBatch {
                messages: vec![raw.message],
            },

            // ============ Parameters ============
            Some("InvalidInput" | "InvalidDomainName" | "InvalidArgument") => {
                ProviderError::InvalidParameter {
                    param: context
                        .record_name
                        .clone()
                        .or_else(|| context.zone.clone())
                        .unwrap_or_else(|| "request".to_string()),
                    detail: raw.message,
                }
            }

            // ============ Fallback ============
            _ if raw.code.is_none() && raw.status == 403 => ProviderError::InvalidCredentials {
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
