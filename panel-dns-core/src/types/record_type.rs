//! Record types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// DNS record types the adapter knows about.
///
/// `NS` and `SOA` only appear in zone listings; they are never submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Naptr,
    Ptr,
    Spf,
    Srv,
    Txt,
    Ns,
    Soa,
}

/// Types accepted for mutation.
/// Reference: <https://docs.aws.amazon.com/Route53/latest/DeveloperGuide/ResourceRecordTypes.html>
pub const PERMITTED_RECORDS: &[RecordType] = &[
    RecordType::A,
    RecordType::Aaaa,
    RecordType::Caa,
    RecordType::Cname,
    RecordType::Mx,
    RecordType::Naptr,
    RecordType::Ptr,
    RecordType::Spf,
    RecordType::Srv,
    RecordType::Txt,
];

impl RecordType {
    /// Upper-case wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ptr => "PTR",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Soa => "SOA",
        }
    }

    /// Whether records of this type may be created, updated or removed.
    pub fn is_permitted(self) -> bool {
        PERMITTED_RECORDS.contains(&self)
    }

    /// Whether the parameter carries a host name (trailing dot is dropped).
    pub fn has_hostname_target(self) -> bool {
        matches!(self, Self::Cname | Self::Ptr | Self::Mx | Self::Srv | Self::Ns)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CAA" => Ok(Self::Caa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NAPTR" => Ok(Self::Naptr),
            "PTR" => Ok(Self::Ptr),
            "SPF" => Ok(Self::Spf),
            "SRV" => Ok(Self::Srv),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SOA" => Ok(Self::Soa),
            other => Err(CoreError::UnsupportedRecordType(other.to_string())),
        }
    }
}
