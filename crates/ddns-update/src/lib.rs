// # ddns-update
//
// Entry point that wires the concrete IP source and provider into the
// core `Reconciler` and runs a single pass.
//
// This is a THIN integration layer: comparison, lookup and write decisions
// all live in ddns-core.

use ddns_core::config::IpSourceConfig;
use ddns_core::{DnsRecord, Reconciler, Result, UpdaterConfig};
use ddns_ip_http::HttpIpSource;
use ddns_provider_cloudflare::{CLOUDFLARE_API_BASE, CloudflareProvider};

/// Knobs outside the record configuration itself
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Where to learn the current public IP
    pub ip_source: IpSourceConfig,

    /// Provider API base URL
    pub api_base: String,

    /// Read everything, write nothing
    pub dry_run: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            ip_source: IpSourceConfig::default(),
            api_base: CLOUDFLARE_API_BASE.to_string(),
            dry_run: false,
        }
    }
}

/// Point the configured record at the current public IP
///
/// Returns `Ok(None)` when the record already holds the current IP and the
/// updated record otherwise. Uses the default echo service and the live
/// Cloudflare API.
pub async fn update_dns_ip(config: &UpdaterConfig) -> Result<Option<DnsRecord>> {
    update_dns_ip_with(config, &UpdateOptions::default()).await
}

/// [`update_dns_ip`] with an explicit IP source, API base and dry-run mode
pub async fn update_dns_ip_with(
    config: &UpdaterConfig,
    options: &UpdateOptions,
) -> Result<Option<DnsRecord>> {
    // Reject bad configuration before any client is built
    config.validate()?;

    let ip_source = HttpIpSource::from_config(&options.ip_source)?;
    let provider = CloudflareProvider::new(config.api_token.clone(), options.dry_run)?
        .with_api_base(options.api_base.clone());

    if options.dry_run {
        tracing::info!("Running in dry-run mode, no changes to DNS records will be made");
    }
    tracing::debug!("IP source: {}", ip_source.url());

    let reconciler = Reconciler::new(Box::new(ip_source), Box::new(provider), config.clone())?;
    reconciler.reconcile().await
}
