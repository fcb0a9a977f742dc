//! Domain → hosted zone metadata

use std::collections::HashMap;

use panel_dns_provider::utils::names::normalize_domain_name;
use panel_dns_provider::{HostedZone, HostedZoneDetail, Route53Api};
use serde::Serialize;

use crate::error::CoreResult;

/// What the module remembers about one hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneMeta {
    pub id: String,
    pub name: String,
    pub caller_reference: String,
    pub record_count: Option<u64>,
    pub private_zone: bool,
    /// Delegation set, fetched on first use.
    pub name_servers: Option<Vec<String>>,
}

impl From<HostedZone> for ZoneMeta {
    fn from(zone: HostedZone) -> Self {
        Self {
            id: zone.id,
            name: normalize_domain_name(&zone.name),
            caller_reference: zone.caller_reference,
            record_count: zone.record_count,
            private_zone: zone.private_zone,
            name_servers: None,
        }
    }
}

impl From<HostedZoneDetail> for ZoneMeta {
    fn from(detail: HostedZoneDetail) -> Self {
        let mut meta = Self::from(detail.zone);
        meta.name_servers = Some(detail.name_servers);
        meta
    }
}

/// Lazily populated map of domain → [`ZoneMeta`].
///
/// Any miss re-runs the full paginated zone listing.
#[derive(Debug, Default)]
pub struct ZoneMetaCache {
    zones: HashMap<String, ZoneMeta>,
}

impl ZoneMetaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, domain: &str) -> Option<&ZoneMeta> {
        self.zones.get(&normalize_domain_name(domain))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.zones.len()
    }

    /// Walk every page of `ListHostedZones` and merge the zones in.
    ///
    /// Returns the number of pages fetched.
    pub async fn populate(&mut self, api: &dyn Route53Api) -> CoreResult<usize> {
        let mut marker: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = api.list_hosted_zones(marker.as_deref()).await?;
            pages += 1;
            for zone in page.zones {
                let meta = ZoneMeta::from(zone);
                self.zones.insert(meta.name.clone(), meta);
            }

            if !page.is_truncated {
                break;
            }
            match page.next_marker {
                Some(next) if marker.as_deref() != Some(next.as_str()) => marker = Some(next),
                _ => {
                    log::warn!(
                        "[route53] Zone listing truncated without a usable marker after {pages} page(s)"
                    );
                    break;
                }
            }
        }

        log::debug!(
            "[route53] Zone metadata populated: {} zone(s) from {pages} page(s)",
            self.zones.len()
        );
        Ok(pages)
    }

    /// Zone id for `domain`, populating on a miss. `None` means the zone does not exist.
    pub async fn zone_id(&mut self, api: &dyn Route53Api, domain: &str) -> CoreResult<Option<String>> {
        Ok(self.lookup(api, domain).await?.map(|meta| meta.id.clone()))
    }

    /// Delegation set for `domain`, memoized after the first `GetHostedZone`.
    pub async fn name_servers(
        &mut self,
        api: &dyn Route53Api,
        domain: &str,
    ) -> CoreResult<Option<Vec<String>>> {
        let Some(meta) = self.lookup(api, domain).await? else {
            return Ok(None);
        };
        if let Some(ns) = &meta.name_servers {
            return Ok(Some(ns.clone()));
        }

        let detail = api.get_hosted_zone(&meta.id).await?;
        let name_servers = detail.name_servers.clone();
        self.insert(ZoneMeta::from(detail));
        Ok(Some(name_servers))
    }

    pub fn insert(&mut self, meta: ZoneMeta) {
        self.zones.insert(normalize_domain_name(&meta.name), meta);
    }

    pub fn invalidate(&mut self, domain: &str) {
        self.zones.remove(&normalize_domain_name(domain));
    }

    async fn lookup(&mut self, api: &dyn Route53Api, domain: &str) -> CoreResult<Option<&ZoneMeta>> {
        let key = normalize_domain_name(domain);
        if !self.zones.contains_key(&key) {
            self.populate(api).await?;
        }
        Ok(self.zones.get(&key))
    }
}
