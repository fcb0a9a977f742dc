//! Record value object

use std::fmt;

use panel_dns_provider::ResourceRecordSet;
use panel_dns_provider::utils::names::{
    full_name_to_relative, normalize_domain_name, relative_to_full_name,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::DEFAULT_TTL;
use crate::types::RecordType;
use crate::utils::normalize::{normalize_parameter, parameter_key};

/// Provider-side bookkeeping attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Route 53 `SetIdentifier`, or the content hash when the record has none.
    pub id: String,
}

/// One resource record as the panel sees it.
///
/// `name` is relative to `zone`; `""` is the apex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub zone: String,
    pub name: String,
    pub rr: RecordType,
    pub parameter: String,
    pub ttl: Option<u32>,
    pub weight: Option<u32>,
    pub meta: RecordMeta,
}

/// Input for [`Record::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordArgs {
    pub name: String,
    pub rr: RecordType,
    pub parameter: String,
    pub ttl: Option<u32>,
    pub weight: Option<u32>,
    pub id: Option<String>,
}

impl RecordArgs {
    pub fn new(name: impl Into<String>, rr: RecordType, parameter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rr,
            parameter: parameter.into(),
            ttl: None,
            weight: None,
            id: None,
        }
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: Option<u32>) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }
}

/// Partial update applied by [`Record::merge`]. `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordChange {
    pub name: Option<String>,
    pub rr: Option<RecordType>,
    pub parameter: Option<String>,
    pub ttl: Option<u32>,
    pub weight: Option<u32>,
}

impl Record {
    /// Build a record in `zone`.
    ///
    /// The zone suffix is stripped from `name` (`www.example.com` → `www`,
    /// `example.com` → `""`), `@` becomes the apex, the parameter is normalized
    /// for its type and a missing id is replaced by [`Record::hash`].
    pub fn new(zone: &str, args: RecordArgs) -> Self {
        let zone = normalize_domain_name(zone);
        let name = normalize_domain_name(&args.name);
        let name = if name == "@" {
            String::new()
        } else {
            full_name_to_relative(&name, &zone)
        };

        let mut record = Self {
            parameter: normalize_parameter(args.rr, &args.parameter),
            zone,
            name,
            rr: args.rr,
            ttl: args.ttl,
            weight: args.weight,
            meta: RecordMeta { id: String::new() },
        };
        record.meta.id = match args.id {
            Some(id) if !id.is_empty() => id,
            _ => record.hash(),
        };
        record
    }

    /// Lowercase hex SHA-256 of `zone\nname\nrr\nparameter\nttl\nweight`.
    ///
    /// Absent ttl/weight render as `null`.
    pub fn hash(&self) -> String {
        let ttl = self.ttl.map_or_else(|| "null".to_string(), |v| v.to_string());
        let weight = self
            .weight
            .map_or_else(|| "null".to_string(), |v| v.to_string());
        let canonical = format!(
            "{}\n{}\n{}\n{}\n{ttl}\n{weight}",
            self.zone, self.name, self.rr, self.parameter
        );
        hex::encode(Sha256::digest(canonical.as_bytes()))
    }

    /// Same logical record: zone, name, type and parameter match.
    ///
    /// Parameters are compared through [`parameter_key`], so a listed
    /// `target.example.net.` is the same record as `target.example.net`.
    pub fn is(&self, other: &Record) -> bool {
        self.zone == other.zone
            && self.name == other.name
            && self.rr == other.rr
            && parameter_key(self.rr, &self.parameter) == parameter_key(other.rr, &other.parameter)
    }

    /// New record with every field `change` supplies. The id is recomputed.
    #[must_use]
    pub fn merge(&self, change: &RecordChange) -> Record {
        let args = RecordArgs::new(
            change.name.clone().unwrap_or_else(|| self.name.clone()),
            change.rr.unwrap_or(self.rr),
            change
                .parameter
                .clone()
                .unwrap_or_else(|| self.parameter.clone()),
        )
        .ttl(change.ttl.or(self.ttl))
        .weight(change.weight.or(self.weight));
        Record::new(&self.zone, args)
    }

    /// Fully-qualified name without the trailing dot.
    pub fn fqdn(&self) -> String {
        relative_to_full_name(&self.name, &self.zone)
    }

    /// Route 53 record set carrying this record as its single value.
    pub fn to_record_set(&self, ttl: u32, weight: u32, set_identifier: String) -> ResourceRecordSet {
        ResourceRecordSet {
            name: self.fqdn(),
            record_type: self.rr.as_str().to_string(),
            set_identifier: Some(set_identifier),
            weight: Some(weight),
            ttl: Some(ttl),
            values: vec![self.parameter.clone()],
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} IN {} {}",
            self.fqdn(),
            self.ttl.unwrap_or(DEFAULT_TTL),
            self.rr,
            self.parameter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, rr: RecordType, parameter: &str) -> Record {
        Record::new("example.com", RecordArgs::new(name, rr, parameter))
    }

    #[test]
    fn zone_suffix_is_stripped() {
        assert_eq!(record("www.example.com", RecordType::A, "192.0.2.1").name, "www");
        assert_eq!(record("www.example.com.", RecordType::A, "192.0.2.1").name, "www");
        assert_eq!(record("example.com", RecordType::A, "192.0.2.1").name, "");
        assert_eq!(record("@", RecordType::A, "192.0.2.1").name, "");
        assert_eq!(record("a.b", RecordType::A, "192.0.2.1").name, "a.b");
    }

    #[test]
    fn id_defaults_to_hash() {
        let r = record("www", RecordType::A, "192.0.2.1");
        assert_eq!(r.meta.id, r.hash());
        assert_eq!(r.meta.id.len(), 64);

        let r = Record::new(
            "example.com",
            RecordArgs::new("www", RecordType::A, "192.0.2.1").id(Some("legacy".into())),
        );
        assert_eq!(r.meta.id, "legacy");
    }

    #[test]
    fn hash_is_deterministic_and_field_sensitive() {
        let a = record("www", RecordType::A, "192.0.2.1");
        let b = record("www", RecordType::A, "192.0.2.1");
        assert_eq!(a.hash(), b.hash());

        assert_ne!(a.hash(), record("web", RecordType::A, "192.0.2.1").hash());
        assert_ne!(a.hash(), record("www", RecordType::A, "192.0.2.2").hash());
        assert_ne!(a.hash(), record("www", RecordType::Aaaa, "192.0.2.1").hash());

        let with_ttl = Record::new(
            "example.com",
            RecordArgs::new("www", RecordType::A, "192.0.2.1").ttl(Some(60)),
        );
        assert_ne!(a.hash(), with_ttl.hash());
    }

    #[test]
    fn is_ignores_ttl_and_meta() {
        let a = record("www", RecordType::A, "192.0.2.1");
        let b = Record::new(
            "example.com",
            RecordArgs::new("www.example.com", RecordType::A, "192.0.2.1")
                .ttl(Some(300))
                .weight(Some(5)),
        );
        assert!(a.is(&b));
        assert_ne!(a.meta.id, b.meta.id);
        assert!(!a.is(&record("www", RecordType::A, "192.0.2.9")));
    }

    #[test]
    fn is_matches_fully_qualified_targets() {
        let listed = record("www", RecordType::Cname, "target.example.net.");
        assert_eq!(listed.parameter, "target.example.net.");
        assert!(listed.is(&record("www", RecordType::Cname, "target.example.net")));
        assert!(
            record("", RecordType::Mx, "10 mail.example.com.")
                .is(&record("", RecordType::Mx, "10 mail.example.com"))
        );
        assert!(!listed.is(&record("www", RecordType::Cname, "other.example.net")));
    }

    #[test]
    fn txt_is_quoted_on_construction() {
        let r = record("", RecordType::Txt, "hello");
        assert_eq!(r.parameter, "\"hello\"");
        assert!(r.is(&record("", RecordType::Txt, "\"hello\"")));
    }

    #[test]
    fn merge_keeps_unchanged_fields_and_rehashes() {
        let old = Record::new(
            "example.com",
            RecordArgs::new("www", RecordType::A, "192.0.2.1")
                .ttl(Some(300))
                .id(Some("set-1".into())),
        );
        let merged = old.merge(&RecordChange {
            parameter: Some("192.0.2.2".into()),
            ..RecordChange::default()
        });
        assert_eq!(merged.name, "www");
        assert_eq!(merged.ttl, Some(300));
        assert_eq!(merged.parameter, "192.0.2.2");
        assert_eq!(merged.meta.id, merged.hash());
    }

    #[test]
    fn display_zone_file_line() {
        let r = record("www", RecordType::Cname, "example.net");
        assert_eq!(r.to_string(), "www.example.com. 1800 IN CNAME example.net");
    }

    #[test]
    fn record_set_uses_fqdn() {
        let set = record("", RecordType::Mx, "10 mail.example.com").to_record_set(60, 1, "id".into());
        assert_eq!(set.name, "example.com");
        assert_eq!(set.record_type, "MX");
        assert_eq!(set.values, vec!["10 mail.example.com"]);
        assert_eq!(set.set_identifier.as_deref(), Some("id"));
    }
}
