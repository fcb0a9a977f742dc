//! Module services

mod credential_validator;
mod dns_module;

pub use credential_validator::CredentialValidator;
pub use dns_module::DnsModule;
