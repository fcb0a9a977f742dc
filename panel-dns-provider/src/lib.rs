//! # panel-dns-provider
//!
//! Amazon Route 53 client used by the hosting panel's DNS adapter.
//!
//! - AWS Signature Version 4 signing with stored key/secret (and optional
//!   session token), for the commercial, China and `GovCloud` partitions.
//! - XML wire codec for the 2013-04-01 REST API.
//! - A bounded retry decorator for throttling and transient network errors.
//! - A structured [`ProviderError`] taxonomy.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use panel_dns_provider::{create_client, ClientOptions, Route53Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Route53Credentials::new("AKIA...", "secret");
//!     let client = create_client(credentials, &ClientOptions::default())?;
//!
//!     println!("{} hosted zones", client.get_hosted_zone_count().await?);
//!
//!     let page = client.list_hosted_zones(None).await?;
//!     for zone in &page.zones {
//!         println!("{} ({})", zone.name, zone.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff, see [`RetryPolicy`].

mod credentials;
mod error;
mod factory;
mod http_client;
mod retry;
mod route53;
mod traits;
mod types;
pub mod utils;

pub use credentials::{
    CredentialValidationError, DEFAULT_REGION, Partition, REGIONS, Route53Credentials,
};
pub use error::{ProviderError, Result};
pub use factory::{ClientOptions, create_client};
pub use retry::{RetryPolicy, is_retryable, with_retry};
pub use route53::{DEFAULT_USER_AGENT, Route53Client, Route53ClientBuilder};
pub use traits::Route53Api;
pub use types::{
    Change, ChangeAction, ChangeBatch, ChangeInfo, HostedZone, HostedZoneDetail, HostedZonePage,
    RecordSetMarker, RecordSetPage, ResourceRecordSet,
};
