//! Route 53 XML wire types (API version 2013-04-01)
//!
//! The document root element is implied by `quick-xml`: response structs
//! describe the root's children, request structs carry the root name through
//! `serde(rename)`.

use serde::{Deserialize, Serialize};

use crate::types::{
    Change, ChangeBatch, ChangeInfo, HostedZone, HostedZoneDetail, RecordSetMarker,
    ResourceRecordSet,
};
use crate::utils::names::{decode_escapes, normalize_domain_name};

use super::XMLNS;

/// Strip the `/hostedzone/` or `/change/` prefix from an id.
pub(crate) fn bare_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Name as Route 53 expects it: fully qualified, with the trailing dot.
fn absolute(name: &str) -> String {
    format!("{}.", name.trim_end_matches('.'))
}

// ============ Hosted zones ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneConfig {
    #[serde(default)]
    pub private_zone: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneXml {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub caller_reference: String,
    pub config: Option<HostedZoneConfig>,
    pub resource_record_set_count: Option<u64>,
}

impl From<HostedZoneXml> for HostedZone {
    fn from(zone: HostedZoneXml) -> Self {
        Self {
            id: bare_id(&zone.id).to_string(),
            name: normalize_domain_name(&decode_escapes(&zone.name)),
            caller_reference: zone.caller_reference,
            record_count: zone.resource_record_set_count,
            private_zone: zone.config.is_some_and(|c| c.private_zone),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HostedZones {
    #[serde(rename = "HostedZone", default)]
    pub items: Vec<HostedZoneXml>,
}

/// Response payload for `ListHostedZones`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListHostedZonesResponse {
    #[serde(default)]
    pub hosted_zones: HostedZones,
    #[serde(default)]
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NameServers {
    #[serde(rename = "NameServer", default)]
    pub items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DelegationSet {
    #[serde(default)]
    pub name_servers: NameServers,
}

/// Response payload for `GetHostedZone` (also the shape of `CreateHostedZone`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetHostedZoneResponse {
    pub hosted_zone: HostedZoneXml,
    pub delegation_set: Option<DelegationSet>,
}

impl From<GetHostedZoneResponse> for HostedZoneDetail {
    fn from(resp: GetHostedZoneResponse) -> Self {
        Self {
            zone: resp.hosted_zone.into(),
            name_servers: resp
                .delegation_set
                .unwrap_or_default()
                .name_servers
                .items
                .iter()
                .map(|ns| normalize_domain_name(ns))
                .collect(),
        }
    }
}

/// Response payload for `GetHostedZoneCount`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetHostedZoneCountResponse {
    pub hosted_zone_count: u64,
}

/// Request body of `CreateHostedZone`.
#[derive(Debug, Serialize)]
#[serde(rename = "CreateHostedZoneRequest", rename_all = "PascalCase")]
pub struct CreateHostedZoneRequest {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    pub name: String,
    pub caller_reference: String,
}

impl CreateHostedZoneRequest {
    pub fn new(name: &str, caller_reference: &str) -> Self {
        Self {
            xmlns: XMLNS,
            name: absolute(name),
            caller_reference: caller_reference.to_string(),
        }
    }
}

// ============ Record sets ============

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceRecordXml {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResourceRecords {
    #[serde(rename = "ResourceRecord", default)]
    pub items: Vec<ResourceRecordXml>,
}

/// `ResourceRecordSet`, fields in schema order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceRecordSetXml {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "SetIdentifier", skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    #[serde(rename = "Weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "ResourceRecords", skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<ResourceRecords>,
}

impl From<ResourceRecordSetXml> for ResourceRecordSet {
    fn from(set: ResourceRecordSetXml) -> Self {
        Self {
            name: decode_escapes(&set.name).trim_end_matches('.').to_string(),
            record_type: set.record_type,
            set_identifier: set.set_identifier,
            weight: set.weight,
            ttl: set.ttl,
            values: set
                .resource_records
                .unwrap_or_default()
                .items
                .into_iter()
                .map(|r| r.value)
                .collect(),
        }
    }
}

impl From<&ResourceRecordSet> for ResourceRecordSetXml {
    fn from(set: &ResourceRecordSet) -> Self {
        Self {
            name: absolute(&set.name),
            record_type: set.record_type.clone(),
            set_identifier: set.set_identifier.clone(),
            weight: set.weight,
            ttl: set.ttl,
            resource_records: Some(ResourceRecords {
                items: set
                    .values
                    .iter()
                    .map(|value| ResourceRecordXml {
                        value: value.clone(),
                    })
                    .collect(),
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceRecordSets {
    #[serde(rename = "ResourceRecordSet", default)]
    pub items: Vec<ResourceRecordSetXml>,
}

/// Response payload for `ListResourceRecordSets`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourceRecordSetsResponse {
    #[serde(default)]
    pub resource_record_sets: ResourceRecordSets,
    #[serde(default)]
    pub is_truncated: bool,
    pub next_record_name: Option<String>,
    pub next_record_type: Option<String>,
    pub next_record_identifier: Option<String>,
}

impl ListResourceRecordSetsResponse {
    /// Continuation marker, if the listing is truncated.
    pub fn marker(&self) -> Option<RecordSetMarker> {
        if !self.is_truncated {
            return None;
        }
        self.next_record_name.as_ref().map(|name| RecordSetMarker {
            name: name.clone(),
            record_type: self.next_record_type.clone(),
            identifier: self.next_record_identifier.clone(),
        })
    }
}

// ============ Changes ============

#[derive(Debug, Serialize)]
pub struct ChangeXml {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    pub record_set: ResourceRecordSetXml,
}

#[derive(Debug, Serialize)]
pub struct Changes {
    #[serde(rename = "Change")]
    pub items: Vec<ChangeXml>,
}

#[derive(Debug, Serialize)]
pub struct ChangeBatchXml {
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "Changes")]
    pub changes: Changes,
}

/// Request body of `ChangeResourceRecordSets`.
#[derive(Debug, Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub struct ChangeResourceRecordSetsRequest {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatchXml,
}

impl From<&ChangeBatch> for ChangeResourceRecordSetsRequest {
    fn from(batch: &ChangeBatch) -> Self {
        Self {
            xmlns: XMLNS,
            change_batch: ChangeBatchXml {
                comment: batch.comment.clone(),
                changes: Changes {
                    items: batch.changes.iter().map(ChangeXml::from).collect(),
                },
            },
        }
    }
}

impl From<&Change> for ChangeXml {
    fn from(change: &Change) -> Self {
        Self {
            action: change.action.as_str(),
            record_set: (&change.record_set).into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeInfoXml {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub submitted_at: String,
}

impl From<ChangeInfoXml> for ChangeInfo {
    fn from(info: ChangeInfoXml) -> Self {
        Self {
            id: bare_id(&info.id).to_string(),
            status: info.status,
            submitted_at: info.submitted_at,
        }
    }
}

/// Response payload of `ChangeResourceRecordSets` and `DeleteHostedZone`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeInfoResponse {
    pub change_info: ChangeInfoXml,
}

// ============ Errors ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// `<ErrorResponse><Error>...</Error><RequestId/></ErrorResponse>`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct Messages {
    #[serde(rename = "Message", default)]
    pub items: Vec<String>,
}

/// `<InvalidChangeBatch><Messages><Message>...</Message></Messages></InvalidChangeBatch>`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvalidChangeBatchResponse {
    #[serde(default)]
    pub messages: Messages,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpUtils;

    const LIST_ZONES: &str = r#"<?xml version="1.0"?>
<ListHostedZonesResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones>
    <HostedZone>
      <Id>/hostedzone/Z111111QQQQQQQ</Id>
      <Name>example.com.</Name>
      <CallerReference>example.com-1700000000000000</CallerReference>
      <Config><Comment>panel</Comment><PrivateZone>false</PrivateZone></Config>
      <ResourceRecordSetCount>4</ResourceRecordSetCount>
    </HostedZone>
    <HostedZone>
      <Id>/hostedzone/Z222222VVVVVVV</Id>
      <Name>Example.ORG.</Name>
      <CallerReference>ref-2</CallerReference>
      <Config><PrivateZone>true</PrivateZone></Config>
    </HostedZone>
  </HostedZones>
  <IsTruncated>true</IsTruncated>
  <NextMarker>Z333333</NextMarker>
  <MaxItems>2</MaxItems>
</ListHostedZonesResponse>"#;

    #[test]
    fn parse_list_hosted_zones() {
        let resp: ListHostedZonesResponse = HttpUtils::parse_xml(LIST_ZONES).unwrap();
        assert!(resp.is_truncated);
        assert_eq!(resp.next_marker.as_deref(), Some("Z333333"));

        let zones: Vec<HostedZone> = resp.hosted_zones.items.into_iter().map(Into::into).collect();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].id, "Z111111QQQQQQQ");
        assert_eq!(zones[0].name, "example.com");
        assert_eq!(zones[0].record_count, Some(4));
        assert!(!zones[0].private_zone);
        assert_eq!(zones[1].name, "example.org");
        assert!(zones[1].private_zone);
    }

    #[test]
    fn parse_empty_zone_list() {
        let xml = r#"<ListHostedZonesResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><HostedZones/><IsTruncated>false</IsTruncated><MaxItems>100</MaxItems></ListHostedZonesResponse>"#;
        let resp: ListHostedZonesResponse = HttpUtils::parse_xml(xml).unwrap();
        assert!(resp.hosted_zones.items.is_empty());
        assert!(!resp.is_truncated);
    }

    #[test]
    fn parse_get_hosted_zone() {
        let xml = r#"<GetHostedZoneResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZone><Id>/hostedzone/Z1</Id><Name>example.com.</Name><CallerReference>r</CallerReference></HostedZone>
  <DelegationSet><NameServers>
    <NameServer>ns-2048.awsdns-64.com</NameServer>
    <NameServer>ns-2049.awsdns-65.net.</NameServer>
  </NameServers></DelegationSet>
</GetHostedZoneResponse>"#;
        let resp: GetHostedZoneResponse = HttpUtils::parse_xml(xml).unwrap();
        let detail: HostedZoneDetail = resp.into();
        assert_eq!(detail.zone.id, "Z1");
        assert_eq!(
            detail.name_servers,
            vec!["ns-2048.awsdns-64.com", "ns-2049.awsdns-65.net"]
        );
    }

    #[test]
    fn parse_record_sets_with_marker() {
        let xml = r#"<ListResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ResourceRecordSets>
    <ResourceRecordSet>
      <Name>example.com.</Name><Type>SOA</Type><TTL>900</TTL>
      <ResourceRecords><ResourceRecord><Value>ns-1.awsdns-1.com. awsdns-hostmaster.amazon.com. 1 7200 900 1209600 86400</Value></ResourceRecord></ResourceRecords>
    </ResourceRecordSet>
    <ResourceRecordSet>
      <Name>\052.example.com.</Name><Type>TXT</Type><SetIdentifier>abc</SetIdentifier><Weight>1</Weight><TTL>300</TTL>
      <ResourceRecords>
        <ResourceRecord><Value>"one"</Value></ResourceRecord>
        <ResourceRecord><Value>"two"</Value></ResourceRecord>
      </ResourceRecords>
    </ResourceRecordSet>
  </ResourceRecordSets>
  <IsTruncated>true</IsTruncated>
  <NextRecordName>www.example.com.</NextRecordName>
  <NextRecordType>A</NextRecordType>
  <NextRecordIdentifier>def</NextRecordIdentifier>
  <MaxItems>2</MaxItems>
</ListResourceRecordSetsResponse>"#;
        let resp: ListResourceRecordSetsResponse = HttpUtils::parse_xml(xml).unwrap();
        let marker = resp.marker().unwrap();
        assert_eq!(marker.name, "www.example.com.");
        assert_eq!(marker.record_type.as_deref(), Some("A"));
        assert_eq!(marker.identifier.as_deref(), Some("def"));

        let sets: Vec<ResourceRecordSet> = resp
            .resource_record_sets
            .items
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(sets[0].record_type, "SOA");
        assert_eq!(sets[0].ttl, Some(900));
        assert_eq!(sets[1].name, "*.example.com");
        assert_eq!(sets[1].set_identifier.as_deref(), Some("abc"));
        assert_eq!(sets[1].weight, Some(1));
        assert_eq!(sets[1].values, vec!["\"one\"", "\"two\""]);
    }

    #[test]
    fn no_marker_when_not_truncated() {
        let xml = r#"<ListResourceRecordSetsResponse><ResourceRecordSets/><IsTruncated>false</IsTruncated><NextRecordName>x.</NextRecordName></ListResourceRecordSetsResponse>"#;
        let resp: ListResourceRecordSetsResponse = HttpUtils::parse_xml(xml).unwrap();
        assert!(resp.marker().is_none());
    }

    #[test]
    fn serialize_change_batch_in_schema_order() {
        let batch = ChangeBatch::new(vec![
            Change::delete(ResourceRecordSet {
                name: "www.example.com".into(),
                record_type: "A".into(),
                set_identifier: Some("old".into()),
                weight: Some(1),
                ttl: Some(1800),
                values: vec!["192.0.2.1".into()],
            }),
            Change::create(ResourceRecordSet {
                name: "www.example.com".into(),
                record_type: "A".into(),
                set_identifier: Some("new".into()),
                weight: Some(1),
                ttl: Some(300),
                values: vec!["192.0.2.2".into()],
            }),
        ]);
        let xml = HttpUtils::to_xml(&ChangeResourceRecordSetsRequest::from(&batch)).unwrap();

        assert!(xml.contains(
            r#"<ChangeResourceRecordSetsRequest xmlns="https://route53.amazonaws.com/doc/2013-04-01/">"#
        ));
        assert!(xml.contains(
            "<Change><Action>DELETE</Action><ResourceRecordSet><Name>www.example.com.</Name><Type>A</Type><SetIdentifier>old</SetIdentifier><Weight>1</Weight><TTL>1800</TTL><ResourceRecords><ResourceRecord><Value>192.0.2.1</Value></ResourceRecord></ResourceRecords></ResourceRecordSet></Change>"
        ));
        let delete_at = xml.find("<Action>DELETE</Action>").unwrap();
        let create_at = xml.find("<Action>CREATE</Action>").unwrap();
        assert!(delete_at < create_at);
        assert!(!xml.contains("<Comment>"));
    }

    #[test]
    fn serialize_create_hosted_zone() {
        let xml = HttpUtils::to_xml(&CreateHostedZoneRequest::new("example.com", "example.com-1"))
            .unwrap();
        assert!(xml.contains("<Name>example.com.</Name>"));
        assert!(xml.contains("<CallerReference>example.com-1</CallerReference>"));
    }

    #[test]
    fn parse_error_bodies() {
        let xml = r#"<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><Error><Type>Sender</Type><Code>NoSuchHostedZone</Code><Message>No hosted zone found with ID: Z1</Message></Error><RequestId>r-1</RequestId></ErrorResponse>"#;
        let resp: ErrorResponse = HttpUtils::parse_xml(xml).unwrap();
        assert_eq!(resp.error.code.as_deref(), Some("NoSuchHostedZone"));

        let xml = r#"<InvalidChangeBatch xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><Messages><Message>Tried to create resource record set [name='www.example.com.', type='A', set-identifier='x'] but it already exists</Message></Messages><RequestId>r-2</RequestId></InvalidChangeBatch>"#;
        let resp: InvalidChangeBatchResponse = HttpUtils::parse_xml(xml).unwrap();
        assert_eq!(resp.messages.items.len(), 1);
    }

    #[test]
    fn bare_ids() {
        assert_eq!(bare_id("/hostedzone/Z1"), "Z1");
        assert_eq!(bare_id("/change/C2"), "C2");
        assert_eq!(bare_id("Z3"), "Z3");
    }
}
