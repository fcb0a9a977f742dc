//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use panel_dns_provider::{CredentialValidationError, ProviderError};

/// Core layer error type.
///
/// The `Display` text is what the panel shows to the user.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Input rejected before any remote call
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Record type outside the permitted list
    #[error("Record type `{0}' is not supported by Route 53 module")]
    UnsupportedRecordType(String),

    /// CNAME requested at the zone apex
    #[error("CNAME records cannot be created at the zone apex of `{0}'")]
    CnameAtApex(String),

    /// Operation needs a domain and none was given
    #[error("Domain is required with Route 53 module")]
    DomainRequired,

    /// No hosted zone for the domain
    #[error("Zone `{0}' not found in Route 53")]
    ZoneNotFound(String),

    /// Record to remove is not in the zone
    #[error("Record `{fqdn}' (rr: `{rr}', param: `{parameter}') does not exist")]
    RecordNotFound {
        fqdn: String,
        rr: String,
        parameter: String,
    },

    /// Record to update has no identifier in the zone
    #[error(
        "failed to find record ID in Route 53 zone `{zone}' - does `{name}' (rr: `{rr}', parameter: `{parameter}') exist?"
    )]
    RecordIdUnresolved {
        zone: String,
        name: String,
        rr: String,
        parameter: String,
    },

    /// Route 53 rejected a create
    #[error("Failed to create record `{fqdn}' type {rr}: {message}")]
    RecordCreate {
        fqdn: String,
        rr: String,
        message: String,
    },

    /// Route 53 rejected a delete
    #[error("Failed to delete record `{fqdn}' type {rr}: {message}")]
    RecordDelete {
        fqdn: String,
        rr: String,
        message: String,
    },

    /// Route 53 rejected an update batch
    #[error(
        "Failed to update record `{name}' on zone `{zone}' (old - rr: `{old_rr}', param: `{old_parameter}'; new - rr: `{new_rr}', param: `{new_parameter}'): {message}"
    )]
    RecordUpdate {
        zone: String,
        name: String,
        old_rr: String,
        old_parameter: String,
        new_rr: String,
        new_parameter: String,
        message: String,
    },

    /// Route 53 rejected a zone creation
    #[error("Failed to add zone `{domain}', error: {message}")]
    ZoneCreate { domain: String, message: String },

    /// Route 53 rejected a zone deletion
    #[error("Failed to remove zone `{domain}', error: {message}")]
    ZoneRemove { domain: String, message: String },

    /// Stored key rejected by Route 53
    #[error("Route 53 key failed: {0}")]
    InvalidCredentials(String),

    /// Credential validation errors (structured, field level)
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl From<CredentialValidationError> for CoreError {
    fn from(e: CredentialValidationError) -> Self {
        Self::CredentialValidation(e)
    }
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing resource, ...). Used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::UnsupportedRecordType(_)
            | Self::CnameAtApex(_)
            | Self::DomainRequired
            | Self::ZoneNotFound(_)
            | Self::RecordNotFound { .. }
            | Self::RecordIdUnresolved { .. }
            | Self::CredentialValidation(_)
            | Self::InvalidCredentials(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
