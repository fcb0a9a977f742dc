//! # panel-dns-core
//!
//! Route 53 DNS module for the hosting panel.
//!
//! - [`DnsModule`]: add, remove and update records, list zones, create and
//!   remove hosted zones.
//! - [`Record`]: the record value object with its content hash and
//!   type-specific normalization.
//! - Zone metadata and record caches, owned by one module instance.
//! - [`CredentialValidator`]: checks a stored key with one read-only call.
//!
//! Operations never return errors. They answer `bool`/`Vec`/`Option` and send
//! the reason for a failure to a [`Reporter`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use panel_dns_core::{DnsModule, HttpClientFactory, LogReporter, Route53Credentials};
//!
//! # async fn run() -> panel_dns_core::CoreResult<()> {
//! let module = DnsModule::from_credentials(
//!     &HttpClientFactory::default(),
//!     Route53Credentials::new("AKIA...", "secret"),
//!     Arc::new(LogReporter),
//! )?;
//! module.add_record("example.com", "www", "A", "192.0.2.1", None).await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use config::ModuleConfig;
pub use error::{CoreError, CoreResult};
pub use panel_dns_provider::ClientOptions;
pub use services::{CredentialValidator, DnsModule};
pub use traits::{
    Canonicalizer, ClientFactory, DefaultCanonicalizer, HttpClientFactory, LogReporter,
    MemoryReporter, Reporter, Severity,
};
pub use types::{Record, RecordArgs, RecordChange, RecordType, Route53Credentials};
