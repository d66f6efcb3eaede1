//! Cloudflare API v4 wire types
//!
//! Every response is wrapped in the same envelope:
//!
//! ```json
//! { "success": true, "errors": [], "messages": [], "result": { ... } }
//! ```

use chrono::{DateTime, Utc};
use ddns_core::traits::DnsRecord;
use ddns_core::{Error, RecordType, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::PROVIDER_NAME;

/// Error codes Cloudflare returns for bad or missing credentials,
/// sometimes with HTTP 400 instead of 401/403
const AUTH_ERROR_CODES: &[i64] = &[6003, 6103, 6111, 9103, 9106, 9109, 10000];

#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    success: bool,

    #[serde(default)]
    errors: Vec<ApiMessage>,

    result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    code: i64,
    message: String,
}

/// DNS record as Cloudflare serializes it
#[derive(Debug, Deserialize)]
pub(crate) struct ApiDnsRecord {
    id: String,
    name: String,

    #[serde(rename = "type")]
    record_type: String,

    content: String,
    ttl: u32,

    #[serde(default)]
    proxied: Option<bool>,

    #[serde(default)]
    modified_on: Option<DateTime<Utc>>,
}

impl TryFrom<ApiDnsRecord> for DnsRecord {
    type Error = Error;

    fn try_from(record: ApiDnsRecord) -> Result<Self> {
        let record_type: RecordType = record.record_type.parse().map_err(|_| {
            Error::config(format!(
                "Record {} ({}) has type {}, only A and AAAA can be updated",
                record.id, record.name, record.record_type
            ))
        })?;

        Ok(DnsRecord {
            id: record.id,
            name: record.name,
            record_type,
            content: record.content,
            ttl: record.ttl,
            proxied: record.proxied,
            modified_on: record.modified_on,
        })
    }
}

fn describe(errors: &[ApiMessage]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unwrap a successful (2xx) response body
pub(crate) fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|e| {
        Error::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
    })?;

    if !envelope.success {
        return Err(Error::provider(
            PROVIDER_NAME,
            format!("API reported failure: {}", describe(&envelope.errors)),
        ));
    }

    envelope.result.ok_or_else(|| {
        Error::provider(PROVIDER_NAME, "Invalid response format: result is missing")
    })
}

/// Map a non-2xx response to an error
///
/// `context` names the object looked up, for `NotFound`.
pub(crate) fn error_for_status(status: u16, body: &str, context: &str) -> Error {
    let errors = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .map(|envelope| envelope.errors)
        .unwrap_or_default();
    let detail = if errors.is_empty() {
        body.trim().chars().take(200).collect()
    } else {
        describe(&errors)
    };

    let bad_credentials = errors
        .iter()
        .any(|e| AUTH_ERROR_CODES.contains(&e.code));

    match status {
        401 | 403 => Error::auth(format!(
            "Invalid API token or insufficient permissions. Status: {} - {}",
            status, detail
        )),
        400 if bad_credentials => Error::auth(format!(
            "Invalid API token format. Status: {} - {}",
            status, detail
        )),
        404 => Error::not_found(format!("{} ({})", context, detail)),
        429 => Error::provider_status(
            PROVIDER_NAME,
            status,
            format!("Rate limit exceeded. Please retry later. {}", detail),
        ),
        500..=599 => Error::provider_status(
            PROVIDER_NAME,
            status,
            format!("Cloudflare server error (transient): {}", detail),
        ),
        _ => Error::provider_status(
            PROVIDER_NAME,
            status,
            format!("Request failed: {}", detail),
        ),
    }
}
