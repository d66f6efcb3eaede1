// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare implementation of `DnsProvider`.
//
// ## Behavior
//
// - ✅ One HTTP request per trait method call
// - ✅ Full error propagation (no retry, no backoff)
// - ✅ HTTP timeout configured (30 seconds)
// - ✅ Specific error handling for HTTP status codes (400, 401, 403, 404, 429, 5xx)
// - ✅ Dry-run mode for safe testing
// - ✅ PATCH semantics: fields not in the patch keep their values
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - Provider MUST fail fast if token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...&type=...`
// - DNS Record Details: GET `/zones/:zone_id/dns_records/:record_id`
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

mod api;

use async_trait::async_trait;
use ddns_core::traits::{DnsProvider, DnsRecord, RecordPatch};
use ddns_core::{Error, RecordType, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

use api::{error_for_status, parse_envelope};

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page the list endpoint serves; more matches than this is ambiguous anyway
const LIST_PAGE_SIZE: &str = "100";

/// Provider name used in errors and logs
const PROVIDER_NAME: &str = "cloudflare";

/// Cloudflare DNS provider
///
/// Stateless and single-shot: every trait method performs exactly one API
/// call (two in dry-run `update_record`, which reads the record instead of
/// writing it).
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Perform all GET requests
/// - Log the intended PATCH payload
/// - **NOT** modify DNS records
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL (without trailing slash)
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, perform GET requests but skip PATCH updates
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `dry_run`: If true, perform GET requests but skip PATCH updates
    pub fn new(api_token: impl Into<String>, dry_run: bool) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            api_base: CLOUDFLARE_API_BASE.to_string(),
            client,
            dry_run,
        })
    }

    /// Create a new Cloudflare provider (production/live mode)
    pub fn new_live(api_token: impl Into<String>) -> Result<Self> {
        Self::new(api_token, false)
    }

    /// Create a new Cloudflare provider (dry-run mode)
    pub fn new_dry_run(api_token: impl Into<String>) -> Result<Self> {
        Self::new(api_token, true)
    }

    /// Use a different API base URL (e.g. a mock server or API gateway)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/dns_records", self.api_base, zone_id)
    }

    fn record_url(&self, zone_id: &str, record_id: &str) -> String {
        format!("{}/zones/{}/dns_records/{}", self.api_base, zone_id, record_id)
    }

    /// Send an authenticated request and unwrap the API envelope
    ///
    /// `context` names the object for `NotFound` errors.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::network(format!("Cloudflare API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read Cloudflare response: {}", e)))?;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), &body, context));
        }

        parse_envelope(&body)
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// List records by exact name and type
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?name=home.example.com&type=A
    /// Authorization: Bearer <token>
    /// ```
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Looking up records: {} (type: {})", name, record_type);

        let request = self.client.get(self.records_url(zone_id)).query(&[
            ("name", name),
            ("type", record_type.as_str()),
            ("per_page", LIST_PAGE_SIZE),
        ]);

        let records: Vec<api::ApiDnsRecord> = self
            .execute(request, &format!("zone {}", zone_id))
            .await?;

        tracing::debug!("Found {} matching record(s)", records.len());
        records.into_iter().map(DnsRecord::try_from).collect()
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        tracing::debug!("Fetching record ID: {}", record_id);

        let request = self.client.get(self.record_url(zone_id, record_id));
        let record: api::ApiDnsRecord = self
            .execute(request, &format!("DNS record {}", record_id))
            .await?;

        DnsRecord::try_from(record)
    }

    /// Patch a record
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// { "content": "203.0.113.9", "ttl": 300, "proxied": false }
    /// ```
    ///
    /// `ttl` and `proxied` are only present when set in the patch.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<DnsRecord> {
        let url = self.record_url(zone_id, record_id);

        if self.dry_run {
            let current = self.get_record(zone_id, record_id).await?;
            tracing::info!(
                "[DRY-RUN] Would send PATCH request to {} with payload: {}",
                url,
                serde_json::to_string(patch).unwrap_or_default()
            );
            return Ok(current.with_patch(patch));
        }

        let request = self.client.patch(&url).json(patch);
        let record: api::ApiDnsRecord = self
            .execute(request, &format!("DNS record {}", record_id))
            .await?;

        DnsRecord::try_from(record)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
