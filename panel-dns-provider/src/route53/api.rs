//! Route 53 `Route53Api` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ErrorContext, Route53Api};
use crate::types::{
    ChangeBatch, ChangeInfo, HostedZoneDetail, HostedZonePage, RecordSetMarker, RecordSetPage,
};

use super::types::{
    ChangeInfoResponse, ChangeResourceRecordSetsRequest, CreateHostedZoneRequest,
    GetHostedZoneCountResponse, GetHostedZoneResponse, ListHostedZonesResponse,
    ListResourceRecordSetsResponse, bare_id,
};
use super::{MAX_PAGE_SIZE, Route53Client};

#[async_trait]
impl Route53Api for Route53Client {
    async fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage> {
        let mut query = vec![("maxitems", MAX_PAGE_SIZE.to_string())];
        if let Some(marker) = marker {
            query.push(("marker", marker.to_string()));
        }

        let response: ListHostedZonesResponse = self
            .get("/hostedzone", &query, ErrorContext::default())
            .await?;

        let next_marker = response.next_marker.filter(|_| response.is_truncated);
        Ok(HostedZonePage {
            zones: response
                .hosted_zones
                .items
                .into_iter()
                .map(Into::into)
                .collect(),
            is_truncated: response.is_truncated,
            next_marker,
        })
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZoneDetail> {
        let id = bare_id(zone_id);
        let response: GetHostedZoneResponse = self
            .get(&format!("/hostedzone/{id}"), &[], ErrorContext::zone(id))
            .await?;
        Ok(response.into())
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        marker: Option<&RecordSetMarker>,
    ) -> Result<RecordSetPage> {
        let id = bare_id(zone_id);
        let mut query = vec![("maxitems", MAX_PAGE_SIZE.to_string())];
        if let Some(marker) = marker {
            query.push(("name", marker.name.clone()));
            if let Some(record_type) = &marker.record_type {
                query.push(("type", record_type.clone()));
            }
            if let Some(identifier) = &marker.identifier {
                query.push(("identifier", identifier.clone()));
            }
        }

        let response: ListResourceRecordSetsResponse = self
            .get(&format!("/hostedzone/{id}/rrset"), &query, ErrorContext::zone(id))
            .await?;

        let next = response.marker();
        Ok(RecordSetPage {
            record_sets: response
                .resource_record_sets
                .items
                .into_iter()
                .map(Into::into)
                .collect(),
            is_truncated: response.is_truncated,
            next,
        })
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo> {
        let id = bare_id(zone_id);
        let ctx = ErrorContext {
            zone: Some(id.to_string()),
            record_name: batch.changes.first().map(|c| c.record_set.name.clone()),
        };

        let response: ChangeInfoResponse = self
            .post(
                &format!("/hostedzone/{id}/rrset/"),
                &ChangeResourceRecordSetsRequest::from(batch),
                ctx,
            )
            .await?;
        Ok(response.change_info.into())
    }

    async fn create_hosted_zone(
        &self,
        name: &str,
        caller_reference: &str,
    ) -> Result<HostedZoneDetail> {
        let response: GetHostedZoneResponse = self
            .post(
                "/hostedzone",
                &CreateHostedZoneRequest::new(name, caller_reference),
                ErrorContext::zone(name),
            )
            .await?;
        Ok(response.into())
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo> {
        let id = bare_id(zone_id);
        let response: ChangeInfoResponse = self
            .delete(&format!("/hostedzone/{id}"), ErrorContext::zone(id))
            .await?;
        Ok(response.change_info.into())
    }

    async fn get_hosted_zone_count(&self) -> Result<u64> {
        let response: GetHostedZoneCountResponse = self
            .get("/hostedzonecount", &[], ErrorContext::default())
            .await?;
        Ok(response.hosted_zone_count)
    }
}
