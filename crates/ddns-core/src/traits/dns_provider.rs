// # DNS Provider Trait
//
// Defines the interface for reading and patching DNS records via provider APIs.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, RecordPatch, RecordType};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let records = provider
//         .list_records("zone-id", "home.example.com", RecordType::A)
//         .await?;
//
//     provider
//         .update_record("zone-id", &records[0].id, &RecordPatch::content("203.0.113.9"))
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::RecordType;

/// A DNS record as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// The record ID (provider-specific)
    pub id: String,
    /// The record name
    pub name: String,
    /// The record type
    pub record_type: RecordType,
    /// The record content (an IP address for A/AAAA)
    pub content: String,
    /// Time-to-live in seconds (1 = automatic)
    pub ttl: u32,
    /// Whether traffic is proxied through the provider, if the provider has such a flag
    pub proxied: Option<bool>,
    /// Last modification time reported by the provider
    pub modified_on: Option<DateTime<Utc>>,
}

impl DnsRecord {
    /// The record as it looks after `patch` is applied
    pub fn with_patch(&self, patch: &RecordPatch) -> Self {
        Self {
            content: patch.content.clone(),
            ttl: patch.ttl.unwrap_or(self.ttl),
            proxied: patch.proxied.or(self.proxied),
            ..self.clone()
        }
    }
}

/// A partial overwrite of a DNS record
///
/// Fields left as `None` are not sent, so the provider keeps their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPatch {
    /// New record content
    pub content: String,
    /// New TTL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// New proxied flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl RecordPatch {
    /// A patch that only replaces the content
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ttl: None,
            proxied: None,
        }
    }

    /// Also overwrite the TTL, when given
    pub fn with_ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Also overwrite the proxied flag, when given
    pub fn with_proxied(mut self, proxied: Option<bool>) -> Self {
        self.proxied = proxied;
        self
    }
}

/// Trait for DNS provider implementations
///
/// # Contract
///
/// Providers are thin, stateless API clients:
/// - One API call per method invocation
/// - No retry, no backoff, no caching
/// - No decision about whether an update is needed (owned by `Reconciler`)
///
/// Errors must map onto the closed [`crate::Error`] taxonomy:
/// - rejected credentials → `Authentication`
/// - unknown record identifier → `NotFound`
/// - unreachable endpoint or timeout → `Network`
/// - everything else, including rate limiting → `Provider`
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List the records of `zone_id` matching `name` and `record_type`
    ///
    /// Returns every match; an empty vector is not an error here.
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Get a single record by identifier
    async fn get_record(&self, zone_id: &str, record_id: &str)
    -> Result<DnsRecord, crate::Error>;

    /// Apply `patch` to a record and return the record as stored afterwards
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<DnsRecord, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
