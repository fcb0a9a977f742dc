//! Module configuration

use serde::{Deserialize, Serialize};

/// TTL used when a record carries none.
pub const DEFAULT_TTL: u32 = 1800;

/// Weight used when a record carries none.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Adapter settings, loaded from the panel's JSON or built in code.
///
/// ```json
/// { "defaultTtl": 300, "defaultWeight": 1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleConfig {
    /// TTL applied to new records and to listed record sets without one.
    pub default_ttl: u32,
    /// Weight applied to submitted record sets without one.
    pub default_weight: u32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            default_weight: DEFAULT_WEIGHT,
        }
    }
}

impl ModuleConfig {
    /// Parse from the panel's stored JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
