use serde::{Deserialize, Serialize};

// ============ Hosted zones ============

/// A hosted zone as returned by the zone listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    /// Bare zone id (`Z1D633PJN98FT9`), without the `/hostedzone/` prefix.
    pub id: String,
    /// Zone name, trailing dot removed.
    pub name: String,
    /// Caller reference used when the zone was created.
    pub caller_reference: String,
    /// Number of record sets, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    /// Whether the zone is a private (VPC) zone.
    pub private_zone: bool,
}

/// A hosted zone together with its delegation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZoneDetail {
    /// The zone.
    pub zone: HostedZone,
    /// Authoritative name servers, trailing dots removed.
    pub name_servers: Vec<String>,
}

/// One page of the zone listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZonePage {
    /// Zones on this page.
    pub zones: Vec<HostedZone>,
    /// `true` when more pages follow.
    pub is_truncated: bool,
    /// Marker for the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_marker: Option<String>,
}

// ============ Record sets ============

/// All values sharing a name, type and (optional) set identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecordSet {
    /// Fully qualified name, escapes decoded and trailing dot removed.
    pub name: String,
    /// Record type as Route 53 spells it (`A`, `TXT`, ...).
    pub record_type: String,
    /// Identifier distinguishing weighted sets with the same name and type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    /// Weight of a weighted set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// TTL in seconds. Absent for alias sets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Record values in presentation format.
    pub values: Vec<String>,
}

/// Continuation marker of the record set listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetMarker {
    /// `NextRecordName`
    pub name: String,
    /// `NextRecordType`
    pub record_type: Option<String>,
    /// `NextRecordIdentifier`
    pub identifier: Option<String>,
}

/// One page of the record set listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetPage {
    /// Record sets on this page.
    pub record_sets: Vec<ResourceRecordSet>,
    /// `true` when more pages follow.
    pub is_truncated: bool,
    /// Marker for the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<RecordSetMarker>,
}

// ============ Changes ============

/// Change action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create a record set; fails if it exists.
    Create,
    /// Delete a record set; every field must match.
    Delete,
    /// Create or replace.
    Upsert,
}

impl ChangeAction {
    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
            Self::Upsert => "UPSERT",
        }
    }
}

/// One change of a [`ChangeBatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// What to do.
    pub action: ChangeAction,
    /// The record set it applies to.
    pub record_set: ResourceRecordSet,
}

impl Change {
    /// `CREATE` change.
    pub fn create(record_set: ResourceRecordSet) -> Self {
        Self {
            action: ChangeAction::Create,
            record_set,
        }
    }

    /// `DELETE` change.
    pub fn delete(record_set: ResourceRecordSet) -> Self {
        Self {
            action: ChangeAction::Delete,
            record_set,
        }
    }
}

/// Changes applied atomically: either all succeed or none do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBatch {
    /// Optional comment stored with the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Ordered changes.
    pub changes: Vec<Change>,
}

impl ChangeBatch {
    /// Batch from a list of changes.
    pub fn new(changes: Vec<Change>) -> Self {
        Self {
            comment: None,
            changes,
        }
    }
}

/// Status of a submitted change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// Bare change id.
    pub id: String,
    /// `PENDING` or `INSYNC`.
    pub status: String,
    /// Submission time as reported (ISO 8601).
    pub submitted_at: String,
}
