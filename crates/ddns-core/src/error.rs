//! Error types for the DDNS updater
//!
//! Every failure of a reconciliation pass maps to one variant of [`Error`].
//! Nothing is retried internally; callers match on the variant to decide
//! whether the next scheduled run may succeed.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or invalid fields)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The IP echo service or the provider could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// A response body did not contain a usable IP address
    #[error("Format error: {0}")]
    Format(String),

    /// The provider rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No record matched the lookup
    #[error("Record not found: {0}")]
    NotFound(String),

    /// More than one record matched the lookup
    #[error("Ambiguous record: {count} records match {name} (type {record_type})")]
    AmbiguousRecord {
        /// Record name that was looked up
        name: String,
        /// Record type that was looked up
        record_type: String,
        /// Number of matching records
        count: usize,
    },

    /// Any other provider failure, including rate limiting
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// HTTP status, when the provider answered at all
        status: Option<u16>,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an ambiguous-record error
    pub fn ambiguous(name: impl Into<String>, record_type: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousRecord {
            name: name.into(),
            record_type: record_type.into(),
            count,
        }
    }

    /// Create a provider error without an HTTP status
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create a provider error for a non-success HTTP status
    pub fn provider_status(
        provider: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Whether a later run might succeed without any change on the caller's side.
    ///
    /// This is a hint for schedulers and logs; the updater itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Provider { status, .. } => match status {
                Some(code) => *code == 429 || (500..=599).contains(code),
                None => true,
            },
            _ => false,
        }
    }
}
