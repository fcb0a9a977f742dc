//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Domain name helpers shared by the client and the adapter.
pub mod names;
