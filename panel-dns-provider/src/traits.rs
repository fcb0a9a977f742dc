use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    ChangeBatch, ChangeInfo, HostedZoneDetail, HostedZonePage, RecordSetMarker, RecordSetPage,
};

/// Raw API error (internal)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status
    pub status: u16,
    /// Route 53 error code (`NoSuchHostedZone`, `Throttling`, ...)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Context used while mapping errors (internal)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone name or id the call was about
    pub zone: Option<String>,
    /// Record name, for change batches
    pub record_name: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone: impl Into<String>) -> Self {
        Self {
            zone: Some(zone.into()),
            record_name: None,
        }
    }
}

/// Maps raw Route 53 errors onto [`ProviderError`] (internal)
pub(crate) trait ProviderErrorMapper {
    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Route 53 API surface used by the DNS adapter.
///
/// Each method is one remote call (retried on transient failures). Zone ids
/// are accepted bare (`Z123`) or prefixed (`/hostedzone/Z123`) and returned bare.
#[async_trait]
pub trait Route53Api: Send + Sync {
    /// `ListHostedZones`: one page, starting at `marker`.
    async fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage>;

    /// `GetHostedZone`: zone and delegation set.
    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZoneDetail>;

    /// `ListResourceRecordSets`: one page, starting at `marker`.
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        marker: Option<&RecordSetMarker>,
    ) -> Result<RecordSetPage>;

    /// `ChangeResourceRecordSets`: apply a batch atomically.
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo>;

    /// `CreateHostedZone`
    async fn create_hosted_zone(
        &self,
        name: &str,
        caller_reference: &str,
    ) -> Result<HostedZoneDetail>;

    /// `DeleteHostedZone`: only succeeds once the zone holds nothing but SOA/NS.
    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo>;

    /// `GetHostedZoneCount`: cheap read-only call, used to check credentials.
    async fn get_hosted_zone_count(&self) -> Result<u64>;
}
