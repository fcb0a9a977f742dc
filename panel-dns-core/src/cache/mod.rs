//! In-memory caches owned by one module instance

mod records;
mod zone_meta;

pub use records::RecordCache;
pub use zone_meta::{ZoneMeta, ZoneMetaCache};
