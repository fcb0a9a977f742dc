//! Type definitions

mod record;
mod record_type;

pub use record::{Record, RecordArgs, RecordChange, RecordMeta};
pub use record_type::{PERMITTED_RECORDS, RecordType};

// Re-export Route 53 library types used in the public API
pub use panel_dns_provider::{HostedZone, ResourceRecordSet, Route53Credentials};
