//! Record reconciliation
//!
//! The [`Reconciler`] runs one straight-line pass:
//!
//! ```text
//! ┌─────────────┐   IpAddr   ┌──────────────┐  read   ┌──────────────┐
//! │  IpSource   │──────────▶│  Reconciler  │───────▶│ DnsProvider  │
//! └─────────────┘            └──────────────┘         └──────────────┘
//!                                   │                        ▲
//!                                   │ content != ip          │
//!                                   └────── patch ───────────┘
//! ```
//!
//! ## Flow
//!
//! 1. Resolve the public IP (no provider call happens if this fails)
//! 2. Read exactly one record, by identifier or by (zone, name, type)
//! 3. Compare the record content to the IP
//! 4. Equal: return `None` without writing
//! 5. Different: patch the content (plus TTL/proxied overrides) and return the new record

use crate::address;
use crate::config::{UpdaterConfig, normalize_name};
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsRecord, IpSource, RecordPatch};
use std::net::IpAddr;
use tracing::{debug, info, warn};

/// One-shot DNS reconciler
///
/// Owns the IP source, the provider and the validated configuration for a
/// single pass. Nothing is kept between calls to [`Reconciler::reconcile`],
/// so calling it again is a fresh, independent pass.
pub struct Reconciler {
    /// Public-IP resolver
    ip_source: Box<dyn IpSource>,

    /// DNS provider client
    provider: Box<dyn DnsProvider>,

    /// Target record and overrides
    config: UpdaterConfig,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// The configuration is validated here, so a bad configuration fails
    /// before any network traffic.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: UpdaterConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            config,
        })
    }

    /// The configuration this reconciler works with
    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(None)`: the record already points at the current IP, nothing was written
    /// - `Ok(Some(record))`: the record was updated; `record` is the provider's new state
    /// - `Err(Error)`: the pass stopped at the failing step, see [`Error`]
    pub async fn reconcile(&self) -> Result<Option<DnsRecord>> {
        let ip = self.resolve_ip().await?;
        let record = self.find_record().await?;

        if address::content_matches(&record.content, &ip) {
            info!(
                "DNS record already has correct IP: {} -> {}",
                record.name, ip
            );
            return Ok(None);
        }

        if address::parse_content(&record.content).is_none() {
            warn!(
                "Record {} has non-address content '{}', overwriting",
                record.name, record.content
            );
        }

        let patch = RecordPatch::content(address::canonical(&ip))
            .with_ttl(self.config.ttl)
            .with_proxied(self.config.proxied);

        info!(
            "Updating DNS record: {} -> {} (was: {})",
            record.name, patch.content, record.content
        );

        let updated = self
            .provider
            .update_record(&self.config.zone_id, &record.id, &patch)
            .await?;

        info!(
            "DNS record updated successfully: {} -> {} (ttl: {}, proxied: {:?})",
            updated.name, updated.content, updated.ttl, updated.proxied
        );

        Ok(Some(updated))
    }

    /// Resolve the public IP and check it fits the configured record type
    async fn resolve_ip(&self) -> Result<IpAddr> {
        // IPv4-mapped IPv6 (::ffff:a.b.c.d) counts as IPv4
        let ip = self.ip_source.current().await?.to_canonical();
        debug!("Resolved public IP {} via {}", ip, self.ip_source.source_name());

        if !self.config.record_type.accepts(&ip) {
            return Err(Error::format(format!(
                "Resolved address {} cannot be stored in a {} record",
                ip, self.config.record_type
            )));
        }

        Ok(ip)
    }

    /// Read the one record this pass works on
    async fn find_record(&self) -> Result<DnsRecord> {
        let zone_id = &self.config.zone_id;
        let name = self.config.normalized_record_name();
        let record_type = self.config.record_type;

        if let Some(ref record_id) = self.config.record_id {
            debug!("Fetching record {} from {}", record_id, self.provider.provider_name());
            let record = self.provider.get_record(zone_id, record_id).await?;

            if normalize_name(&record.name) != name || record.record_type != record_type {
                return Err(Error::config(format!(
                    "Record {} is {} {}, but the configuration expects {} {}",
                    record_id, record.record_type, record.name, record_type, name
                )));
            }

            return Ok(record);
        }

        debug!(
            "Looking up record {} (type: {}) via {}",
            name,
            record_type,
            self.provider.provider_name()
        );

        let mut records = self
            .provider
            .list_records(zone_id, &name, record_type)
            .await?;

        match records.len() {
            0 => Err(Error::not_found(format!(
                "DNS record not found: {} (type: {})",
                name, record_type
            ))),
            1 => Ok(records.remove(0)),
            count => Err(Error::ambiguous(name, record_type.as_str(), count)),
        }
    }
}
