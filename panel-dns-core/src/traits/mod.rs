//! Seams between the module and its collaborators

mod canonicalizer;
mod client_factory;
mod reporter;

pub use canonicalizer::{CanonicalRecord, Canonicalizer, DefaultCanonicalizer, MAX_TTL, RawRecord};
pub use client_factory::{ClientFactory, HttpClientFactory};
pub use reporter::{LogReporter, MemoryReporter, Report, Reporter, Severity};
