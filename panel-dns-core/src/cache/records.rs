//! Per-zone record cache

use std::collections::HashMap;

use panel_dns_provider::{RecordSetMarker, ResourceRecordSet, Route53Api};

use crate::error::CoreResult;
use crate::types::{Record, RecordArgs, RecordType};

type RecordKey = (String, RecordType);

/// Zone → (name, type) → records, filled from a full `ListResourceRecordSets` walk.
///
/// A zone is either absent (never listed, or invalidated) or holds the complete
/// listing plus the module's own mutations since.
#[derive(Debug, Default)]
pub struct RecordCache {
    zones: HashMap<String, HashMap<RecordKey, Vec<Record>>>,
}

impl RecordCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self, zone: &str) -> bool {
        self.zones.contains_key(zone)
    }

    /// List every record set of `zone_id` and replace the zone's entries.
    ///
    /// Returns the records in discovery order, one per value. Sets of types the
    /// module does not model are skipped.
    pub async fn populate(
        &mut self,
        api: &dyn Route53Api,
        zone: &str,
        zone_id: &str,
        default_ttl: u32,
    ) -> CoreResult<Vec<Record>> {
        let mut marker: Option<RecordSetMarker> = None;
        let mut records = Vec::new();
        let mut pages = 0;

        loop {
            let page = api
                .list_resource_record_sets(zone_id, marker.as_ref())
                .await?;
            pages += 1;
            for set in &page.record_sets {
                records.extend(records_from_set(zone, set, default_ttl));
            }

            if !page.is_truncated {
                break;
            }
            match page.next {
                Some(next) if marker.as_ref() != Some(&next) => marker = Some(next),
                _ => {
                    log::warn!(
                        "[route53] Record listing of `{zone}' truncated without a usable marker after {pages} page(s)"
                    );
                    break;
                }
            }
        }

        let mut entries: HashMap<RecordKey, Vec<Record>> = HashMap::new();
        for record in &records {
            entries
                .entry(key_of(record))
                .or_default()
                .push(record.clone());
        }
        self.zones.insert(zone.to_string(), entries);

        log::debug!(
            "[route53] Cached {} record(s) of `{zone}' from {pages} page(s)",
            records.len()
        );
        Ok(records)
    }

    /// First cached record matching zone, name and type, plus the parameter
    /// (compared as by [`Record::is`]) when the probe carries one.
    pub fn lookup(&self, probe: &Record) -> Option<&Record> {
        self.zones
            .get(&probe.zone)?
            .get(&key_of(probe))?
            .iter()
            .find(|r| probe.parameter.is_empty() || r.is(probe))
    }

    pub fn insert(&mut self, record: Record) {
        let bucket = self
            .zones
            .entry(record.zone.clone())
            .or_default()
            .entry(key_of(&record))
            .or_default();
        bucket.retain(|r| !r.is(&record));
        bucket.push(record);
    }

    /// Drop the exact (`is`) entry. An emptied key is removed.
    pub fn remove(&mut self, record: &Record) -> bool {
        let Some(entries) = self.zones.get_mut(&record.zone) else {
            return false;
        };
        let key = key_of(record);
        let Some(bucket) = entries.get_mut(&key) else {
            return false;
        };
        let before = bucket.len();
        bucket.retain(|r| !r.is(record));
        let removed = bucket.len() != before;
        if bucket.is_empty() {
            entries.remove(&key);
        }
        removed
    }

    pub fn invalidate(&mut self, zone: &str) {
        self.zones.remove(zone);
    }

    /// Cached records of `zone`, ordered by name then type.
    #[cfg(test)]
    pub(crate) fn records(&self, zone: &str) -> Option<Vec<Record>> {
        let entries = self.zones.get(zone)?;
        let mut keys: Vec<&RecordKey> = entries.keys().collect();
        keys.sort();
        Some(
            keys.into_iter()
                .flat_map(|k| entries[k].iter().cloned())
                .collect(),
        )
    }

    /// Number of values cached under (name, type).
    #[cfg(test)]
    pub(crate) fn count(&self, zone: &str, name: &str, rr: RecordType) -> usize {
        self.zones
            .get(zone)
            .and_then(|e| e.get(&(name.to_string(), rr)))
            .map_or(0, Vec::len)
    }
}

fn key_of(record: &Record) -> RecordKey {
    (record.name.clone(), record.rr)
}

/// One [`Record`] per value of `set`. Alias sets carry no values and yield nothing.
fn records_from_set(zone: &str, set: &ResourceRecordSet, default_ttl: u32) -> Vec<Record> {
    let Ok(rr) = set.record_type.parse::<RecordType>() else {
        log::debug!(
            "[route53] Skipping `{}' record set of unmodelled type {}",
            set.name,
            set.record_type
        );
        return Vec::new();
    };
    set.values
        .iter()
        .map(|value| {
            Record::new(
                zone,
                RecordArgs::new(set.name.clone(), rr, value.clone())
                    .ttl(Some(set.ttl.unwrap_or(default_ttl)))
                    .weight(set.weight)
                    .id(set.set_identifier.clone()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockRoute53Api, record_set};

    fn txt(value: &str) -> Record {
        Record::new("example.com", RecordArgs::new("www", RecordType::Txt, value))
    }

    #[tokio::test]
    async fn populate_follows_markers_and_expands_values() {
        let api = MockRoute53Api::new();
        api.push_record_page(
            "Z1",
            vec![
                record_set("example.com", "SOA", None, &["ns-1. hostmaster. 1 7200 900 1209600 86400"]),
                record_set("www.example.com", "TXT", None, &["\"a\"", "\"b\""]),
            ],
            Some(RecordSetMarker {
                name: "\\052.example.com.".into(),
                record_type: Some("A".into()),
                identifier: None,
            }),
        )
        .await;
        api.push_record_page(
            "Z1",
            vec![
                record_set("*.example.com", "A", Some("set-1"), &["192.0.2.1"]),
                record_set("example.com", "DS", None, &["1 2 3 ABC"]),
            ],
            None,
        )
        .await;

        let mut cache = RecordCache::new();
        let records = cache.populate(&api, "example.com", "Z1", 1800).await.unwrap();

        assert_eq!(api.calls_named("list_resource_record_sets").await, 2);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].rr, RecordType::Soa);
        assert_eq!(records[3].name, "*");
        assert_eq!(records[3].meta.id, "set-1");
        assert_eq!(records[1].ttl, Some(1800));
        assert_eq!(cache.count("example.com", "www", RecordType::Txt), 2);
    }

    #[test]
    fn lookup_with_and_without_parameter() {
        let mut cache = RecordCache::new();
        cache.insert(txt("a"));
        cache.insert(txt("b"));

        assert_eq!(cache.lookup(&txt("b")).unwrap().parameter, "\"b\"");
        assert_eq!(cache.lookup(&txt("")).unwrap().parameter, "\"a\"");
        assert!(cache.lookup(&txt("c")).is_none());
    }

    #[test]
    fn lookup_and_remove_match_listed_trailing_dot_targets() {
        let mut cache = RecordCache::new();
        let listed = |value: &str| {
            Record::new(
                "example.com",
                RecordArgs::new("www.example.com.", RecordType::Cname, value),
            )
        };
        cache.insert(listed("target.example.net."));

        let found = cache.lookup(&listed("target.example.net")).unwrap();
        assert_eq!(found.parameter, "target.example.net.");
        assert!(cache.remove(&listed("target.example.net")));
        assert_eq!(cache.count("example.com", "www", RecordType::Cname), 0);
    }

    #[test]
    fn remove_one_of_two_keeps_the_other() {
        let mut cache = RecordCache::new();
        cache.insert(txt("a"));
        cache.insert(txt("b"));

        assert!(cache.remove(&txt("a")));
        assert_eq!(cache.count("example.com", "www", RecordType::Txt), 1);
        assert!(cache.lookup(&txt("b")).is_some());

        assert!(cache.remove(&txt("b")));
        assert_eq!(cache.count("example.com", "www", RecordType::Txt), 0);
        assert_eq!(cache.records("example.com"), Some(vec![]));
        assert!(!cache.remove(&txt("b")));
    }

    #[test]
    fn insert_replaces_same_logical_record() {
        let mut cache = RecordCache::new();
        cache.insert(txt("a"));
        let mut updated = txt("a");
        updated.ttl = Some(60);
        cache.insert(updated);

        assert_eq!(cache.count("example.com", "www", RecordType::Txt), 1);
        assert_eq!(cache.lookup(&txt("a")).unwrap().ttl, Some(60));
    }

    #[test]
    fn invalidate_drops_zone() {
        let mut cache = RecordCache::new();
        cache.insert(txt("a"));
        assert!(cache.is_populated("example.com"));
        cache.invalidate("example.com");
        assert!(!cache.is_populated("example.com"));
        assert!(cache.records("example.com").is_none());
    }
}
