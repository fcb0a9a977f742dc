//! Test helpers
//!
//! A scripted, call-recording [`Route53Api`] double plus fixture builders.

use std::collections::HashMap;

use async_trait::async_trait;
use panel_dns_provider::{
    ChangeBatch, ChangeInfo, HostedZone, HostedZoneDetail, HostedZonePage, ProviderError,
    RecordSetMarker, RecordSetPage, ResourceRecordSet, Result, Route53Api,
};
use tokio::sync::RwLock;

// ===== Fixtures =====

pub fn hosted_zone(id: &str, name: &str) -> HostedZone {
    HostedZone {
        id: id.to_string(),
        name: name.trim_end_matches('.').to_string(),
        caller_reference: format!("{id}-ref"),
        record_count: Some(2),
        private_zone: false,
    }
}

pub fn record_set(
    name: &str,
    record_type: &str,
    set_identifier: Option<&str>,
    values: &[&str],
) -> ResourceRecordSet {
    ResourceRecordSet {
        name: name.to_string(),
        record_type: record_type.to_string(),
        set_identifier: set_identifier.map(str::to_string),
        weight: set_identifier.map(|_| 1),
        ttl: None,
        values: values.iter().map(|v| (*v).to_string()).collect(),
    }
}

fn change_info() -> ChangeInfo {
    ChangeInfo {
        id: "C0000000000001".to_string(),
        status: "PENDING".to_string(),
        submitted_at: "2024-01-15T08:00:00Z".to_string(),
    }
}

// ===== MockRoute53Api =====

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListHostedZones(Option<String>),
    GetHostedZone(String),
    ListResourceRecordSets(String, Option<RecordSetMarker>),
    ChangeResourceRecordSets(String, ChangeBatch),
    CreateHostedZone(String, String),
    DeleteHostedZone(String),
    GetHostedZoneCount,
}

impl MockCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListHostedZones(_) => "list_hosted_zones",
            Self::GetHostedZone(_) => "get_hosted_zone",
            Self::ListResourceRecordSets(..) => "list_resource_record_sets",
            Self::ChangeResourceRecordSets(..) => "change_resource_record_sets",
            Self::CreateHostedZone(..) => "create_hosted_zone",
            Self::DeleteHostedZone(_) => "delete_hosted_zone",
            Self::GetHostedZoneCount => "get_hosted_zone_count",
        }
    }
}

/// Pages are keyed by the marker that requests them; the first page by `None`.
#[derive(Default)]
pub struct MockRoute53Api {
    calls: RwLock<Vec<MockCall>>,
    zone_pages: RwLock<Vec<(Option<String>, HostedZonePage)>>,
    record_pages: RwLock<HashMap<String, Vec<(Option<RecordSetMarker>, RecordSetPage)>>>,
    name_servers: RwLock<HashMap<String, Vec<String>>>,
    /// Popped one per change call; an empty queue means success.
    change_errors: RwLock<Vec<ProviderError>>,
    list_records_error: RwLock<Option<ProviderError>>,
    get_zone_error: RwLock<Option<ProviderError>>,
    create_zone_error: RwLock<Option<ProviderError>>,
    delete_zone_error: RwLock<Option<ProviderError>>,
    zone_count: RwLock<Option<Result<u64>>>,
}

impl MockRoute53Api {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_zone_page(&self, zones: Vec<HostedZone>, next_marker: Option<&str>) {
        let mut pages = self.zone_pages.write().await;
        let key = pages.last().and_then(|(_, p)| p.next_marker.clone());
        pages.push((
            key,
            HostedZonePage {
                zones,
                is_truncated: next_marker.is_some(),
                next_marker: next_marker.map(str::to_string),
            },
        ));
    }

    pub async fn push_truncated_zone_page_without_marker(&self, zones: Vec<HostedZone>) {
        self.zone_pages.write().await.push((
            None,
            HostedZonePage {
                zones,
                is_truncated: true,
                next_marker: None,
            },
        ));
    }

    pub async fn push_record_page(
        &self,
        zone_id: &str,
        record_sets: Vec<ResourceRecordSet>,
        next: Option<RecordSetMarker>,
    ) {
        let mut all = self.record_pages.write().await;
        let pages = all.entry(zone_id.to_string()).or_default();
        let key = pages.last().and_then(|(_, p)| p.next.clone());
        pages.push((
            key,
            RecordSetPage {
                record_sets,
                is_truncated: next.is_some(),
                next,
            },
        ));
    }

    pub async fn set_name_servers(&self, zone_id: &str, name_servers: Vec<String>) {
        self.name_servers
            .write()
            .await
            .insert(zone_id.to_string(), name_servers);
    }

    pub async fn push_change_error(&self, error: ProviderError) {
        self.change_errors.write().await.push(error);
    }

    pub async fn set_list_records_error(&self, error: Option<ProviderError>) {
        *self.list_records_error.write().await = error;
    }

    pub async fn set_get_zone_error(&self, error: Option<ProviderError>) {
        *self.get_zone_error.write().await = error;
    }

    pub async fn set_create_zone_error(&self, error: Option<ProviderError>) {
        *self.create_zone_error.write().await = error;
    }

    pub async fn set_delete_zone_error(&self, error: Option<ProviderError>) {
        *self.delete_zone_error.write().await = error;
    }

    pub async fn set_zone_count(&self, result: Result<u64>) {
        *self.zone_count.write().await = Some(result);
    }

    // ----- inspection -----

    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_names(&self) -> Vec<&'static str> {
        self.calls.read().await.iter().map(MockCall::name).collect()
    }

    pub async fn calls_named(&self, name: &str) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.name() == name)
            .count()
    }

    pub async fn zone_markers(&self) -> Vec<Option<String>> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                MockCall::ListHostedZones(marker) => Some(marker.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn change_batches(&self) -> Vec<ChangeBatch> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                MockCall::ChangeResourceRecordSets(_, batch) => Some(batch.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: MockCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl Route53Api for MockRoute53Api {
    async fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage> {
        self.record(MockCall::ListHostedZones(marker.map(str::to_string)))
            .await;
        Ok(self
            .zone_pages
            .read()
            .await
            .iter()
            .find(|(key, _)| key.as_deref() == marker)
            .map(|(_, page)| page.clone())
            .unwrap_or_default())
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZoneDetail> {
        self.record(MockCall::GetHostedZone(zone_id.to_string())).await;
        if let Some(e) = self.get_zone_error.read().await.clone() {
            return Err(e);
        }
        let zone = self
            .zone_pages
            .read()
            .await
            .iter()
            .flat_map(|(_, p)| p.zones.iter())
            .find(|z| z.id == zone_id)
            .cloned()
            .ok_or_else(|| ProviderError::ZoneNotFound {
                zone: zone_id.to_string(),
                raw_message: Some(format!("No hosted zone found with ID: {zone_id}")),
            })?;
        let name_servers = self
            .name_servers
            .read()
            .await
            .get(zone_id)
            .cloned()
            .unwrap_or_default();
        Ok(HostedZoneDetail { zone, name_servers })
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        marker: Option<&RecordSetMarker>,
    ) -> Result<RecordSetPage> {
        self.record(MockCall::ListResourceRecordSets(
            zone_id.to_string(),
            marker.cloned(),
        ))
        .await;
        if let Some(e) = self.list_records_error.read().await.clone() {
            return Err(e);
        }
        Ok(self
            .record_pages
            .read()
            .await
            .get(zone_id)
            .and_then(|pages| pages.iter().find(|(key, _)| key.as_ref() == marker))
            .map(|(_, page)| page.clone())
            .unwrap_or_default())
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo> {
        self.record(MockCall::ChangeResourceRecordSets(
            zone_id.to_string(),
            batch.clone(),
        ))
        .await;
        let mut errors = self.change_errors.write().await;
        if !errors.is_empty() {
            return Err(errors.remove(0));
        }
        Ok(change_info())
    }

    async fn create_hosted_zone(
        &self,
        name: &str,
        caller_reference: &str,
    ) -> Result<HostedZoneDetail> {
        self.record(MockCall::CreateHostedZone(
            name.to_string(),
            caller_reference.to_string(),
        ))
        .await;
        if let Some(e) = self.create_zone_error.read().await.clone() {
            return Err(e);
        }
        Ok(HostedZoneDetail {
            zone: HostedZone {
                id: "ZCREATED".to_string(),
                name: name.trim_end_matches('.').to_string(),
                caller_reference: caller_reference.to_string(),
                record_count: Some(2),
                private_zone: false,
            },
            name_servers: vec![
                "ns-1.awsdns-01.org".to_string(),
                "ns-2.awsdns-02.com".to_string(),
            ],
        })
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo> {
        self.record(MockCall::DeleteHostedZone(zone_id.to_string()))
            .await;
        if let Some(e) = self.delete_zone_error.read().await.clone() {
            return Err(e);
        }
        Ok(change_info())
    }

    async fn get_hosted_zone_count(&self) -> Result<u64> {
        self.record(MockCall::GetHostedZoneCount).await;
        self.zone_count.read().await.clone().unwrap_or(Ok(0))
    }
}
