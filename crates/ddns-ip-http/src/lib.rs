// # HTTP IP Source
//
// This crate provides the public-IP resolver for the DDNS updater.
//
// ## Architecture
//
// Fetches the current IP from an external echo service (e.g. ifconfig.co,
// api.ipify.org, icanhazip.com) with a single GET request. The body is either
// the bare address or, for services such as `https://ifconfig.co` with
// `Accept: application/json`, a JSON object with an `ip` field.
//
// ## Error Mapping
//
// - Request failure, timeout, non-2xx status → `Error::Network`
// - Body that is not an address → `Error::Format`

use ddns_core::config::{IpSourceConfig, ResponseFormat};
use ddns_core::traits::IpSource;
use ddns_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// User agent sent to echo services (some answer HTML to browser-like clients)
const USER_AGENT: &str = concat!("ddns-update/", env!("CARGO_PKG_VERSION"));

/// HTTP-based public IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// How to read the response body
    format: ResponseFormat,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source with the default timeout
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://ifconfig.co/ip")
    /// - `format`: How to read the response body
    pub fn new(url: impl Into<String>, format: ResponseFormat) -> Result<Self> {
        Self::from_config(&IpSourceConfig {
            url: url.into(),
            format,
            ..IpSourceConfig::default()
        })
    }

    /// Create an HTTP IP source from configuration
    pub fn from_config(config: &IpSourceConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: config.url.clone(),
            format: config.format,
            client,
        })
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the response body from the echo service
    async fn fetch_body(&self) -> Result<String> {
        let accept = match self.format {
            ResponseFormat::Text => "text/plain",
            ResponseFormat::Json => "application/json",
        };

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "IP service {} answered HTTP {}",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        let body = self.fetch_body().await?;
        let ip = parse_ip_body(&body, self.format)?;

        tracing::debug!("IP service {} reported {}", self.url, ip);
        Ok(ip)
    }

    fn source_name(&self) -> &str {
        "http"
    }
}

/// Parse an echo service response body
pub fn parse_ip_body(body: &str, format: ResponseFormat) -> Result<IpAddr> {
    let text = match format {
        ResponseFormat::Text => body.trim().to_string(),
        ResponseFormat::Json => {
            let json: serde_json::Value = serde_json::from_str(body)
                .map_err(|e| Error::format(format!("Response is not JSON: {}", e)))?;

            json["ip"]
                .as_str()
                .ok_or_else(|| Error::format("Invalid response format: ip is not a string"))?
                .trim()
                .to_string()
        }
    };

    text.parse()
        .map_err(|_| Error::format(format!("Invalid IP address: {}", truncate(&text, 64))))
}

/// Keep error messages short when a service answers with a whole page
fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
