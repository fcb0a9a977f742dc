//! Route 53 DNS module

use std::sync::Arc;

use chrono::{DateTime, Utc};
use panel_dns_provider::utils::names::normalize_domain_name;
use panel_dns_provider::{
    Change, ChangeBatch, ProviderError, ResourceRecordSet, Route53Api, Route53Credentials,
};
use tokio::sync::Mutex;

use crate::cache::{RecordCache, ZoneMeta, ZoneMetaCache};
use crate::config::ModuleConfig;
use crate::error::{CoreError, CoreResult};
use crate::traits::{
    Canonicalizer, ClientFactory, DefaultCanonicalizer, RawRecord, Reporter,
};
use crate::types::{PERMITTED_RECORDS, Record, RecordArgs, RecordChange, RecordType};

/// Route 53 caps `CallerReference` at 128 characters.
const MAX_CALLER_REFERENCE_LEN: usize = 128;

#[derive(Debug, Default)]
struct CacheState {
    zones: ZoneMetaCache,
    records: RecordCache,
}

/// The panel's DNS provider module for Route 53.
///
/// Every operation validates first, resolves the zone and the record's
/// identifier through the caches, submits one change (or one delete+create
/// batch for updates) and then reconciles the caches. Failures are never
/// returned; they go to the [`Reporter`] and the operation answers
/// `false`/empty.
///
/// The caches sit behind one mutex held for a whole operation, so concurrent
/// callers are serialized and remote calls never overlap.
pub struct DnsModule {
    api: Arc<dyn Route53Api>,
    reporter: Arc<dyn Reporter>,
    canonicalizer: Arc<dyn Canonicalizer>,
    config: ModuleConfig,
    state: Mutex<CacheState>,
}

impl DnsModule {
    #[must_use]
    pub fn new(api: Arc<dyn Route53Api>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            api,
            reporter,
            canonicalizer: Arc::new(DefaultCanonicalizer::new(
                PERMITTED_RECORDS.to_vec(),
                true,
            )),
            config: ModuleConfig::default(),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Build the client from stored credentials.
    pub fn from_credentials(
        factory: &dyn ClientFactory,
        credentials: Route53Credentials,
        reporter: Arc<dyn Reporter>,
    ) -> CoreResult<Self> {
        Ok(Self::new(factory.create(credentials)?, reporter))
    }

    #[must_use]
    pub fn with_config(mut self, config: ModuleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_canonicalizer(mut self, canonicalizer: Arc<dyn Canonicalizer>) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Route 53 refuses CNAME records at the zone apex.
    pub fn has_cname_apex_restriction(&self) -> bool {
        true
    }

    /// Record types this module creates, updates and removes.
    pub fn permitted_records(&self) -> &'static [RecordType] {
        PERMITTED_RECORDS
    }

    // ===== Record operations =====

    /// Create one record. `ttl` defaults to the configured TTL.
    pub async fn add_record(
        &self,
        zone: &str,
        subdomain: &str,
        rr: &str,
        parameter: &str,
        ttl: Option<u32>,
    ) -> bool {
        let mut state = self.state.lock().await;
        let result = self
            .add_record_inner(&mut state, zone, subdomain, rr, parameter, ttl)
            .await;
        self.finish(result)
    }

    /// Remove one record. An empty `parameter` removes the first value under
    /// the name and type.
    pub async fn remove_record(&self, zone: &str, subdomain: &str, rr: &str, parameter: &str) -> bool {
        let mut state = self.state.lock().await;
        let result = async {
            let probe = self.canonical_record(zone, subdomain, rr, parameter, None)?;
            self.remove_record_inner(&mut state, probe).await
        }
        .await;
        self.finish(result)
    }

    /// Replace `old` with `old` merged with `change` in one atomic batch.
    pub async fn update_record(&self, zone: &str, old: &Record, change: &RecordChange) -> bool {
        let mut state = self.state.lock().await;
        let result = self.update_record_inner(&mut state, zone, old, change).await;
        self.finish(result)
    }

    /// Whether the record is present in the zone (as far as the cache knows).
    pub async fn record_exists(&self, zone: &str, subdomain: &str, rr: &str, parameter: &str) -> bool {
        let mut state = self.state.lock().await;
        let result = self
            .record_exists_inner(&mut state, zone, subdomain, rr, parameter)
            .await;
        self.finish_or(result, false)
    }

    // ===== Zone operations =====

    /// Delegation set of `domain`. Empty when the zone is unknown or Route 53 fails.
    pub async fn get_hosting_nameservers(&self, domain: Option<&str>) -> Vec<String> {
        let Some(domain) = domain.map(normalize_domain_name).filter(|d| !d.is_empty()) else {
            self.report(&CoreError::DomainRequired);
            return Vec::new();
        };

        let mut state = self.state.lock().await;
        match state.zones.name_servers(self.api.as_ref(), &domain).await {
            Ok(Some(name_servers)) => name_servers,
            Ok(None) => {
                log::warn!("[route53] No hosted zone for `{domain}', no nameservers");
                Vec::new()
            }
            Err(e) => {
                log::warn!("[route53] Failed to fetch nameservers of `{domain}': {e}");
                Vec::new()
            }
        }
    }

    /// Create the hosted zone. An existing zone is a warning, not a failure.
    ///
    /// `ip` is only logged; Route 53 needs no origin address.
    pub async fn add_zone_backend(&self, domain: &str, ip: &str) -> bool {
        let domain = normalize_domain_name(domain);
        if domain.is_empty() {
            return self.finish(Err(CoreError::DomainRequired));
        }
        log::info!("[route53] Creating hosted zone `{domain}' (origin {ip})");

        let mut state = self.state.lock().await;
        let caller_reference = caller_reference(&domain, Utc::now());
        match self.api.create_hosted_zone(&domain, &caller_reference).await {
            Ok(detail) => {
                state.zones.insert(ZoneMeta::from(detail));
                true
            }
            Err(ProviderError::ZoneExists { .. }) => {
                self.reporter
                    .warn(&format!("Zone `{domain}' already exists"));
                true
            }
            Err(e) => self.finish(Err(CoreError::ZoneCreate {
                domain,
                message: e.provider_message(),
            })),
        }
    }

    /// Remove every record but SOA/NS one by one, then delete the hosted zone.
    ///
    /// A failed record removal is reported and the loop goes on.
    pub async fn remove_zone_backend(&self, domain: &str) -> bool {
        let domain = normalize_domain_name(domain);
        let mut state = self.state.lock().await;
        let result = self.remove_zone_inner(&mut state, &domain).await;
        self.finish(result)
    }

    /// Zone in zone-file text, SOA first. `None` when the zone cannot be listed.
    pub async fn zone_axfr(&self, domain: &str) -> Option<String> {
        let records = self.zone_records(domain).await?;
        let (soa, rest): (Vec<&Record>, Vec<&Record>) =
            records.iter().partition(|r| r.rr == RecordType::Soa);
        Some(
            soa.into_iter()
                .chain(rest)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// Fresh listing of every record in the zone, in discovery order.
    pub async fn zone_records(&self, domain: &str) -> Option<Vec<Record>> {
        let domain = normalize_domain_name(domain);
        let mut state = self.state.lock().await;
        match self.list_zone(&mut state, &domain).await {
            Ok(records) => Some(records),
            Err(e) => {
                log::warn!("[route53] Failed to list zone `{domain}': {e}");
                None
            }
        }
    }

    // ===== Lock-free internals =====

    async fn add_record_inner(
        &self,
        state: &mut CacheState,
        zone: &str,
        subdomain: &str,
        rr: &str,
        parameter: &str,
        ttl: Option<u32>,
    ) -> CoreResult<()> {
        let ttl = Some(ttl.unwrap_or(self.config.default_ttl));
        let mut record = self.canonical_record(zone, subdomain, rr, parameter, ttl)?;

        let zone_id = self.zone_id(state, &record.zone).await?;
        self.ensure_records(state, &record.zone, &zone_id).await?;

        let set = self.format_record(state, &record);
        let batch = ChangeBatch::new(vec![Change::create(set.clone())]);
        self.api
            .change_resource_record_sets(&zone_id, &batch)
            .await
            .map_err(|e| CoreError::RecordCreate {
                fqdn: record.fqdn(),
                rr: record.rr.to_string(),
                message: e.provider_message(),
            })?;

        log::debug!("[route53] Created {record}");
        record.meta.id = set.set_identifier.unwrap_or_else(|| record.hash());
        state.records.insert(record);
        Ok(())
    }

    async fn record_exists_inner(
        &self,
        state: &mut CacheState,
        zone: &str,
        subdomain: &str,
        rr: &str,
        parameter: &str,
    ) -> CoreResult<bool> {
        let probe = self.canonical_record(zone, subdomain, rr, parameter, None)?;
        let zone_id = self.zone_id(state, &probe.zone).await?;
        self.ensure_records(state, &probe.zone, &zone_id).await?;
        Ok(state.records.lookup(&probe).is_some())
    }

    async fn remove_record_inner(&self, state: &mut CacheState, probe: Record) -> CoreResult<()> {
        let zone_id = self.zone_id(state, &probe.zone).await?;
        self.ensure_records(state, &probe.zone, &zone_id).await?;

        let Some(cached) = state.records.lookup(&probe).cloned() else {
            return Err(CoreError::RecordNotFound {
                fqdn: probe.fqdn(),
                rr: probe.rr.to_string(),
                parameter: probe.parameter,
            });
        };
        // Route 53 matches DELETE values byte for byte; send what it listed.
        let target = Record::new(
            &probe.zone,
            RecordArgs::new(probe.name.clone(), probe.rr, cached.parameter.clone())
                .ttl(probe.ttl)
                .weight(probe.weight),
        );

        let set = self.format_record(state, &target);
        let batch = ChangeBatch::new(vec![Change::delete(set)]);
        self.api
            .change_resource_record_sets(&zone_id, &batch)
            .await
            .map_err(|e| CoreError::RecordDelete {
                fqdn: target.fqdn(),
                rr: target.rr.to_string(),
                message: e.provider_message(),
            })?;

        log::debug!("[route53] Removed {target}");
        state.records.remove(&target);
        Ok(())
    }

    async fn update_record_inner(
        &self,
        state: &mut CacheState,
        zone: &str,
        old: &Record,
        change: &RecordChange,
    ) -> CoreResult<()> {
        let mut old_record = self.canonical_record(
            zone,
            &old.name,
            old.rr.as_str(),
            &old.parameter,
            old.ttl,
        )?;
        old_record.weight = old.weight;

        let zone_id = self.zone_id(state, &old_record.zone).await?;
        self.ensure_records(state, &old_record.zone, &zone_id).await?;

        let Some(cached) = state.records.lookup(&old_record).cloned() else {
            return Err(CoreError::RecordIdUnresolved {
                zone: old_record.zone.clone(),
                name: old.name.clone(),
                rr: old.rr.to_string(),
                parameter: old.parameter.clone(),
            });
        };
        old_record.parameter = cached.parameter.clone();
        old_record.ttl = old_record.ttl.or(cached.ttl);
        old_record.weight = old_record.weight.or(cached.weight);

        let merged = old_record.merge(change);
        let mut new_record = self.canonical_record(
            &merged.zone,
            &merged.name,
            merged.rr.as_str(),
            &merged.parameter,
            merged.ttl,
        )?;
        new_record.weight = merged.weight;

        let delete = self.format_record(state, &old_record);
        let create = self.format_record(state, &new_record);
        let new_id = create.set_identifier.clone();
        let batch = ChangeBatch::new(vec![Change::delete(delete), Change::create(create)]);
        self.api
            .change_resource_record_sets(&zone_id, &batch)
            .await
            .map_err(|e| CoreError::RecordUpdate {
                zone: old_record.zone.clone(),
                name: old.name.clone(),
                old_rr: old.rr.to_string(),
                old_parameter: old.parameter.clone(),
                new_rr: new_record.rr.to_string(),
                new_parameter: new_record.parameter.clone(),
                message: e.provider_message(),
            })?;

        log::debug!("[route53] Updated {old_record} -> {new_record}");
        state.records.remove(&old_record);
        if let Some(id) = new_id {
            new_record.meta.id = id;
        }
        state.records.insert(new_record);
        Ok(())
    }

    async fn remove_zone_inner(&self, state: &mut CacheState, domain: &str) -> CoreResult<()> {
        let zone_error = |e: CoreError| CoreError::ZoneRemove {
            domain: domain.to_string(),
            message: match e {
                CoreError::Provider(p) => p.provider_message(),
                other => other.to_string(),
            },
        };

        let zone_id = self.zone_id(state, domain).await?;
        let records = self.list_zone(state, domain).await.map_err(zone_error)?;

        // TODO: submit the removals as one change batch once partial failures
        // can be attributed to individual records.
        for record in records {
            if matches!(record.rr, RecordType::Soa | RecordType::Ns) {
                continue;
            }
            if let Err(e) = self.remove_record_inner(state, record).await {
                self.report(&e);
            }
        }

        self.api
            .delete_hosted_zone(&zone_id)
            .await
            .map_err(|e| zone_error(e.into()))?;

        log::info!("[route53] Removed hosted zone `{domain}' ({zone_id})");
        state.zones.invalidate(domain);
        state.records.invalidate(domain);
        Ok(())
    }

    /// Canonicalize panel input into a record.
    fn canonical_record(
        &self,
        zone: &str,
        name: &str,
        rr: &str,
        parameter: &str,
        ttl: Option<u32>,
    ) -> CoreResult<Record> {
        let canonical = self.canonicalizer.canonicalize(RawRecord {
            zone,
            name,
            rr,
            parameter,
            ttl,
        })?;
        Ok(Record::new(
            &canonical.zone,
            RecordArgs::new(canonical.name, canonical.rr, canonical.parameter).ttl(canonical.ttl),
        ))
    }

    async fn zone_id(&self, state: &mut CacheState, zone: &str) -> CoreResult<String> {
        state
            .zones
            .zone_id(self.api.as_ref(), zone)
            .await?
            .ok_or_else(|| CoreError::ZoneNotFound(zone.to_string()))
    }

    async fn ensure_records(&self, state: &mut CacheState, zone: &str, zone_id: &str) -> CoreResult<()> {
        if !state.records.is_populated(zone) {
            state
                .records
                .populate(self.api.as_ref(), zone, zone_id, self.config.default_ttl)
                .await?;
        }
        Ok(())
    }

    async fn list_zone(&self, state: &mut CacheState, domain: &str) -> CoreResult<Vec<Record>> {
        let zone_id = self.zone_id(state, domain).await?;
        state
            .records
            .populate(self.api.as_ref(), domain, &zone_id, self.config.default_ttl)
            .await
    }

    /// Record set for a change. Route 53 matches deletes on TTL and weight
    /// too, so missing values come from the cached copy before the defaults.
    fn format_record(&self, state: &CacheState, record: &Record) -> ResourceRecordSet {
        let cached = state.records.lookup(record);
        let ttl = record
            .ttl
            .or_else(|| cached.and_then(|c| c.ttl))
            .unwrap_or(self.config.default_ttl);
        let weight = record
            .weight
            .or_else(|| cached.and_then(|c| c.weight))
            .unwrap_or(self.config.default_weight);
        let set_identifier = cached.map_or_else(|| record.hash(), |c| c.meta.id.clone());
        record.to_record_set(ttl, weight, set_identifier)
    }

    fn report(&self, error: &CoreError) {
        self.reporter.error(&error.to_string());
    }

    fn finish(&self, result: CoreResult<()>) -> bool {
        self.finish_or(result.map(|()| true), false)
    }

    fn finish_or<T>(&self, result: CoreResult<T>, fallback: T) -> T {
        result.unwrap_or_else(|e| {
            self.report(&e);
            fallback
        })
    }
}

/// `<domain>-<unix micros>`, with the domain cut so the whole fits Route 53's limit.
fn caller_reference(domain: &str, now: DateTime<Utc>) -> String {
    let suffix = format!("-{}", now.timestamp_micros());
    let room = MAX_CALLER_REFERENCE_LEN.saturating_sub(suffix.len());
    let prefix: String = domain.chars().take(room).collect();
    format!("{prefix}{suffix}")
}
