use serde::{Deserialize, Serialize};

/// Provider tag used as the prefix of every rendered error.
pub(crate) const PROVIDER_NAME: &str = "route53";

/// Unified error type for all Route 53 operations.
///
/// All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues, HTTP 502-504
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): HTTP 429, or HTTP 400 with a throttling code
///
/// The client retries these through [`with_retry`](crate::with_retry) with a bounded
/// exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded.
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The access key, secret or session token was rejected.
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The credentials are valid but lack permission for the operation.
    PermissionDenied {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The hosted zone does not exist.
    ZoneNotFound {
        /// Zone name or id that was not found.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A hosted zone with the same name and caller reference already exists.
    ZoneExists {
        /// Zone name.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The hosted zone still carries records other than SOA/NS.
    ZoneNotEmpty {
        /// Zone name or id.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Route 53 rejected a change batch. Nothing in the batch was applied.
    InvalidChangeBatch {
        /// One message per rejected change.
        messages: Vec<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    Unknown {
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is an expected outcome (bad input, missing resource, ...).
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::InvalidParameter { .. }
                | Self::ZoneNotFound { .. }
                | Self::ZoneExists { .. }
                | Self::ZoneNotEmpty { .. }
                | Self::InvalidChangeBatch { .. }
        )
    }

    /// Transient errors worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// The provider's own error text, without the `[route53]` prefix.
    ///
    /// This is what the panel shows next to its own context ("Failed to create record ...").
    #[must_use]
    pub fn provider_message(&self) -> String {
        match self {
            Self::NetworkError { detail }
            | Self::Timeout { detail }
            | Self::ParseError { detail }
            | Self::SerializationError { detail }
            | Self::InvalidParameter { detail, .. } => detail.clone(),
            Self::RateLimited { raw_message, .. } => raw_message
                .clone()
                .unwrap_or_else(|| "Rate exceeded".to_string()),
            Self::InvalidCredentials { raw_message }
            | Self::PermissionDenied { raw_message }
            | Self::ZoneNotFound { raw_message, .. }
            | Self::ZoneExists { raw_message, .. }
            | Self::ZoneNotEmpty { raw_message, .. } => {
                raw_message.clone().unwrap_or_else(|| self.to_string())
            }
            Self::InvalidChangeBatch { messages } => messages.join("; "),
            Self::Unknown { raw_message, .. } => raw_message.clone(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = PROVIDER_NAME;
        match self {
            Self::NetworkError { detail } => write!(f, "[{p}] Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "[{p}] Request timeout: {detail}"),
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{p}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{p}] Rate limited")
                }
            }
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{p}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{p}] Invalid credentials")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{p}] Permission denied: {msg}")
                } else {
                    write!(f, "[{p}] Permission denied")
                }
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "[{p}] Invalid parameter '{param}': {detail}")
            }
            Self::ZoneNotFound { zone, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{p}] Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "[{p}] Zone '{zone}' not found")
                }
            }
            Self::ZoneExists { zone, .. } => write!(f, "[{p}] Zone '{zone}' already exists"),
            Self::ZoneNotEmpty { zone, .. } => write!(f, "[{p}] Zone '{zone}' is not empty"),
            Self::InvalidChangeBatch { messages } => {
                write!(f, "[{p}] Invalid change batch: {}", messages.join("; "))
            }
            Self::ParseError { detail } => write!(f, "[{p}] Parse error: {detail}"),
            Self::SerializationError { detail } => {
                write!(f, "[{p}] Serialization error: {detail}")
            }
            Self::Unknown { raw_message, .. } => write!(f, "[{p}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
