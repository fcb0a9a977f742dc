//! Record canonicalization

use std::net::{Ipv4Addr, Ipv6Addr};

use panel_dns_provider::utils::names::{full_name_to_relative, normalize_domain_name};

use crate::error::{CoreError, CoreResult};
use crate::types::{PERMITTED_RECORDS, RecordType};

/// Largest TTL Route 53 accepts.
pub const MAX_TTL: u32 = 2_147_483_647;

/// Record fields as the panel passes them in.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    pub zone: &'a str,
    pub name: &'a str,
    pub rr: &'a str,
    pub parameter: &'a str,
    pub ttl: Option<u32>,
}

/// Record fields after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub zone: String,
    /// Zone-relative; `@` is kept for the apex.
    pub name: String,
    pub rr: RecordType,
    pub parameter: String,
    pub ttl: Option<u32>,
}

/// Normalizes and validates a record before any mutation.
///
/// An `Err` means no remote call may be made.
pub trait Canonicalizer: Send + Sync {
    fn canonicalize(&self, raw: RawRecord<'_>) -> CoreResult<CanonicalRecord>;
}

/// Route 53 rules.
#[derive(Debug, Clone)]
pub struct DefaultCanonicalizer {
    permitted: Vec<RecordType>,
    cname_apex_restriction: bool,
}

impl Default for DefaultCanonicalizer {
    fn default() -> Self {
        Self::new(PERMITTED_RECORDS.to_vec(), true)
    }
}

impl DefaultCanonicalizer {
    #[must_use]
    pub fn new(permitted: Vec<RecordType>, cname_apex_restriction: bool) -> Self {
        Self {
            permitted,
            cname_apex_restriction,
        }
    }

    fn canonical_name(name: &str, zone: &str) -> CoreResult<String> {
        let name = name.trim().to_lowercase();
        if name == "@" || name.is_empty() {
            return Ok(name);
        }
        if name.ends_with('.') {
            let full = normalize_domain_name(&name);
            if full != zone && !full.ends_with(&format!(".{zone}")) {
                return Err(CoreError::ValidationError(format!(
                    "Record `{full}' is outside of zone `{zone}'"
                )));
            }
            return Ok(full_name_to_relative(&full, zone));
        }
        Ok(name)
    }

    fn canonical_parameter(rr: RecordType, parameter: &str) -> CoreResult<String> {
        let parameter = parameter.trim();
        if parameter.is_empty() {
            return Ok(String::new());
        }
        let invalid = |what: &str| {
            CoreError::ValidationError(format!("Invalid {rr} parameter `{parameter}': {what}"))
        };

        match rr {
            RecordType::A => parameter
                .parse::<Ipv4Addr>()
                .map(|ip| ip.to_string())
                .map_err(|_| invalid("not an IPv4 address")),
            RecordType::Aaaa => parameter
                .parse::<Ipv6Addr>()
                .map(|ip| ip.to_string())
                .map_err(|_| invalid("not an IPv6 address")),
            RecordType::Cname | RecordType::Ptr => Ok(strip_host(parameter)),
            RecordType::Mx => {
                let fields: Vec<&str> = parameter.split_whitespace().collect();
                let [priority, host] = fields.as_slice() else {
                    return Err(invalid("expected `priority host'"));
                };
                let priority: u16 = priority.parse().map_err(|_| invalid("bad priority"))?;
                Ok(format!("{priority} {}", strip_host(host)))
            }
            RecordType::Srv => {
                let fields: Vec<&str> = parameter.split_whitespace().collect();
                let [priority, weight, port, target] = fields.as_slice() else {
                    return Err(invalid("expected `priority weight port target'"));
                };
                let mut numbers = [0u16; 3];
                for (slot, value) in numbers.iter_mut().zip([priority, weight, port]) {
                    *slot = value.parse().map_err(|_| invalid("bad number"))?;
                }
                let [priority, weight, port] = numbers;
                Ok(format!("{priority} {weight} {port} {}", strip_host(target)))
            }
            RecordType::Caa => {
                let mut fields = parameter.splitn(3, char::is_whitespace);
                let (Some(flags), Some(tag), Some(value)) =
                    (fields.next(), fields.next(), fields.next())
                else {
                    return Err(invalid("expected `flags tag value'"));
                };
                let flags: u8 = flags.parse().map_err(|_| invalid("bad flags"))?;
                if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(invalid("bad tag"));
                }
                Ok(format!("{flags} {} {}", tag.to_lowercase(), value.trim()))
            }
            _ => Ok(parameter.to_string()),
        }
    }
}

fn strip_host(host: &str) -> String {
    host.trim_end_matches('.').to_string()
}

impl Canonicalizer for DefaultCanonicalizer {
    fn canonicalize(&self, raw: RawRecord<'_>) -> CoreResult<CanonicalRecord> {
        let zone = normalize_domain_name(raw.zone);
        if zone.is_empty() {
            return Err(CoreError::ValidationError("Zone must not be empty".to_string()));
        }

        let name = Self::canonical_name(raw.name, &zone)?;

        let rr: RecordType = raw.rr.parse()?;
        if !self.permitted.contains(&rr) {
            return Err(CoreError::UnsupportedRecordType(rr.to_string()));
        }

        if self.cname_apex_restriction
            && rr == RecordType::Cname
            && (name.is_empty() || name == "@")
        {
            return Err(CoreError::CnameAtApex(zone));
        }

        if let Some(ttl) = raw.ttl
            && ttl > MAX_TTL
        {
            return Err(CoreError::ValidationError(format!(
                "TTL {ttl} is out of range (0-{MAX_TTL})"
            )));
        }

        let parameter = Self::canonical_parameter(rr, raw.parameter)?;

        Ok(CanonicalRecord {
            zone,
            name,
            rr,
            parameter,
            ttl: raw.ttl,
        })
    }
}
