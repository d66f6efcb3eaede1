//! Configuration types for the DDNS updater
//!
//! [`UpdaterConfig`] carries the provider credentials and the target record.
//! [`IpSourceConfig`] describes the public-IP echo service. Both are
//! immutable for the duration of one invocation.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default public-IP echo endpoint (plain text body)
pub const DEFAULT_IP_SOURCE_URL: &str = "https://ifconfig.co/ip";

/// Default timeout for the IP echo request (in seconds)
pub const DEFAULT_IP_SOURCE_TIMEOUT_SECS: u64 = 10;

/// TTL value meaning "automatic" on the provider side
pub const TTL_AUTOMATIC: u32 = 1;

/// Smallest explicit TTL accepted (in seconds)
pub const MIN_TTL_SECS: u32 = 30;

/// Largest TTL accepted (in seconds)
pub const MAX_TTL_SECS: u32 = 86_400;

/// DNS record type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[default]
    #[serde(rename = "A", alias = "a")]
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA", alias = "aaaa")]
    Aaaa,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Whether the address family of `ip` fits this record type
    pub fn accepts(&self, ip: &IpAddr) -> bool {
        match self {
            RecordType::A => ip.is_ipv4(),
            RecordType::Aaaa => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            other => Err(Error::config(format!(
                "Unsupported record type '{}'. Supported types: A, AAAA",
                other
            ))),
        }
    }
}

/// Body format of the IP echo service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Body is the bare address, e.g. `203.0.113.5\n`
    #[default]
    Text,
    /// Body is a JSON object with an `ip` string field
    Json,
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResponseFormat::Text => "text",
            ResponseFormat::Json => "json",
        })
    }
}

impl FromStr for ResponseFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(ResponseFormat::Text),
            "json" => Ok(ResponseFormat::Json),
            other => Err(Error::config(format!(
                "Unsupported IP source format '{}'. Supported formats: text, json",
                other
            ))),
        }
    }
}

/// Public-IP echo service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpSourceConfig {
    /// URL to fetch the IP from
    #[serde(default = "default_ip_source_url")]
    pub url: String,

    /// How to read the response body
    #[serde(default)]
    pub format: ResponseFormat,

    /// Request timeout in seconds
    #[serde(default = "default_ip_source_timeout_secs")]
    pub timeout_secs: u64,
}

impl IpSourceConfig {
    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::config("IP source URL cannot be empty"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(Error::config(format!(
                "IP source URL must use HTTP or HTTPS scheme. Got: {}",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("IP source timeout must be > 0"));
        }
        Ok(())
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        Self {
            url: default_ip_source_url(),
            format: ResponseFormat::default(),
            timeout_secs: default_ip_source_timeout_secs(),
        }
    }
}

fn default_ip_source_url() -> String {
    DEFAULT_IP_SOURCE_URL.to_string()
}

fn default_ip_source_timeout_secs() -> u64 {
    DEFAULT_IP_SOURCE_TIMEOUT_SECS
}

/// Provider credentials and the record to keep in sync
///
/// # Security
///
/// The Debug implementation does NOT expose the API token.
#[derive(Clone, Deserialize)]
pub struct UpdaterConfig {
    /// Provider API token
    /// ⚠️ NEVER log this value
    pub api_token: String,

    /// Zone identifier
    pub zone_id: String,

    /// Fully-qualified record name (e.g. "home.example.com")
    pub record_name: String,

    /// Record type (A for IPv4, AAAA for IPv6)
    #[serde(default)]
    pub record_type: RecordType,

    /// TTL override; the record keeps its TTL when unset
    #[serde(default)]
    pub ttl: Option<u32>,

    /// Proxied override; the record keeps its flag when unset
    #[serde(default)]
    pub proxied: Option<bool>,

    /// Record identifier; skips the name/type search when set
    #[serde(default)]
    pub record_id: Option<String>,
}

impl fmt::Debug for UpdaterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdaterConfig")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("record_name", &self.record_name)
            .field("record_type", &self.record_type)
            .field("ttl", &self.ttl)
            .field("proxied", &self.proxied)
            .field("record_id", &self.record_id)
            .finish()
    }
}

impl UpdaterConfig {
    /// Create a configuration for an A record with no overrides
    pub fn new(
        api_token: impl Into<String>,
        zone_id: impl Into<String>,
        record_name: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            zone_id: zone_id.into(),
            record_name: record_name.into(),
            record_type: RecordType::A,
            ttl: None,
            proxied: None,
            record_id: None,
        }
    }

    /// Set the record type
    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    /// Override the TTL on update
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Override the proxied flag on update
    pub fn with_proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    /// Address the record by identifier instead of by name and type
    pub fn with_record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    /// Build a configuration from a mapping of named parameters
    ///
    /// Recognized keys: `api_token`, `zone_id`, `record_name` (required),
    /// `record_type`, `ttl`, `proxied`, `record_id` (optional). Empty optional
    /// values count as absent. The result is validated before it is returned.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            map_value(map, key)
                .map(str::to_string)
                .ok_or_else(|| Error::config(format!("Missing required key: {}", key)))
        };

        let record_type = match map_value(map, "record_type") {
            Some(value) => value.parse()?,
            None => RecordType::default(),
        };

        let ttl = map_value(map, "ttl")
            .map(|value| {
                value
                    .parse::<u32>()
                    .map_err(|_| Error::config(format!("ttl must be an integer. Got: {}", value)))
            })
            .transpose()?;

        let proxied = map_value(map, "proxied").map(parse_bool).transpose()?;

        let config = Self {
            api_token: required("api_token")?,
            zone_id: required("zone_id")?,
            record_name: required("record_name")?,
            record_type,
            ttl,
            proxied,
            record_id: map_value(map, "record_id").map(str::to_string),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(Error::config("api_token cannot be empty"));
        }
        if self.zone_id.trim().is_empty() {
            return Err(Error::config("zone_id cannot be empty"));
        }

        validate_domain_name(&self.record_name)?;

        if let Some(ttl) = self.ttl
            && ttl != TTL_AUTOMATIC
            && !(MIN_TTL_SECS..=MAX_TTL_SECS).contains(&ttl)
        {
            return Err(Error::config(format!(
                "ttl must be {} (automatic) or between {} and {} seconds. Got: {}",
                TTL_AUTOMATIC, MIN_TTL_SECS, MAX_TTL_SECS, ttl
            )));
        }

        if let Some(ref record_id) = self.record_id
            && record_id.trim().is_empty()
        {
            return Err(Error::config("record_id cannot be empty when set"));
        }

        Ok(())
    }

    /// Record name in the form the provider reports it (lowercase, no trailing dot)
    pub fn normalized_record_name(&self) -> String {
        normalize_name(&self.record_name)
    }
}

/// Lowercase a domain name and drop the trailing root dot
pub fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Trimmed value for `key`, with blank values treated as absent
fn map_value<'a>(map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Parse a boolean option value (`true/false`, `1/0`, `yes/no`, `on/off`)
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!(
            "proxied must be a boolean (true/false). Got: {}",
            value
        ))),
    }
}

/// Validate that a string is a usable record name
///
/// Basic RFC 1035 checks; a leading `*` label is accepted for wildcard records.
fn validate_domain_name(domain: &str) -> Result<()> {
    let domain = domain.trim().trim_end_matches('.');

    if domain.is_empty() {
        return Err(Error::config("record_name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(Error::config(format!(
            "record_name too long: {} chars (max 253)",
            domain.len()
        )));
    }

    if !domain.contains('.') {
        return Err(Error::config(format!(
            "record_name must be fully qualified. Got: '{}'",
            domain
        )));
    }

    for (index, label) in domain.split('.').enumerate() {
        if label.is_empty() {
            return Err(Error::config(format!(
                "record_name has empty label: '{}'",
                domain
            )));
        }

        if index == 0 && label == "*" {
            continue;
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "record_name label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::config(format!(
                "record_name label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "record_name label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
