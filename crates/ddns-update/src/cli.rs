use clap::{Parser, ValueEnum};
use ddns_core::config::{DEFAULT_IP_SOURCE_TIMEOUT_SECS, IpSourceConfig, parse_bool};
use ddns_core::{RecordType, ResponseFormat, UpdaterConfig};
use ddns_provider_cloudflare::CLOUDFLARE_API_BASE;
use ddns_update::UpdateOptions;

/// Point a DNS record at this host's current public IP, once
#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cloudflare API token with Zone:DNS:Edit permission
    #[arg(long, value_name = "API_TOKEN", env = "DDNS_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Zone identifier the record lives in
    #[arg(long, value_name = "ZONE_ID", env = "DDNS_ZONE_ID")]
    pub zone_id: String,

    /// Fully qualified record name, e.g. home.example.com
    #[arg(long, value_name = "NAME", env = "DDNS_RECORD_NAME")]
    pub record_name: String,

    /// Record type: A for IPv4, AAAA for IPv6
    #[arg(long, value_name = "TYPE", default_value_t = RecordType::A, env = "DDNS_RECORD_TYPE")]
    pub record_type: RecordType,

    /// Read the record by identifier instead of searching by name and type
    #[arg(long, value_name = "RECORD_ID", env = "DDNS_RECORD_ID")]
    pub record_id: Option<String>,

    /// TTL to set when the record is updated (1 = automatic)
    #[arg(long, value_name = "SECONDS", env = "DDNS_TTL")]
    pub ttl: Option<u32>,

    /// Proxied flag to set when the record is updated
    #[arg(long, value_name = "BOOL", value_parser = parse_proxied, env = "DDNS_PROXIED")]
    pub proxied: Option<bool>,

    /// Echo service that answers with the caller's public IP
    #[arg(
        long,
        value_name = "URL",
        default_value = ddns_core::config::DEFAULT_IP_SOURCE_URL,
        env = "DDNS_IP_SOURCE_URL"
    )]
    pub ip_source_url: String,

    /// Echo service response format
    #[arg(
        long,
        value_name = "FORMAT",
        default_value_t = ResponseFormat::Text,
        env = "DDNS_IP_SOURCE_FORMAT"
    )]
    pub ip_source_format: ResponseFormat,

    /// Provider API base URL
    #[arg(long, value_name = "URL", default_value = CLOUDFLARE_API_BASE, env = "DDNS_API_BASE")]
    pub api_base: String,

    /// Do not change the DNS record, only show what would happen
    #[arg(long, short = 'd', action, default_value_t = false)]
    pub dry_run: bool,

    /// Run mode; dry-run is the same as --dry-run
    #[arg(value_enum, long, default_value_t = Mode::Live, env = "DDNS_MODE")]
    pub mode: Mode,

    /// Set the log level
    #[arg(
        value_enum,
        short = 'l',
        long,
        default_value_t = LogLevel::Info,
        value_name = "LEVEL",
        env = "DDNS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

impl Cli {
    /// Whether the write should be skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.mode == Mode::DryRun
    }

    /// Record configuration, validated
    pub fn updater_config(&self) -> ddns_core::Result<UpdaterConfig> {
        let mut config = UpdaterConfig::new(
            self.api_token.clone(),
            self.zone_id.clone(),
            self.record_name.clone(),
        )
        .with_record_type(self.record_type);

        if let Some(ttl) = self.ttl {
            config = config.with_ttl(ttl);
        }
        if let Some(proxied) = self.proxied {
            config = config.with_proxied(proxied);
        }
        if let Some(record_id) = &self.record_id {
            config = config.with_record_id(record_id.clone());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn update_options(&self) -> UpdateOptions {
        UpdateOptions {
            ip_source: IpSourceConfig {
                url: self.ip_source_url.clone(),
                format: self.ip_source_format,
                timeout_secs: DEFAULT_IP_SOURCE_TIMEOUT_SECS,
            },
            api_base: self.api_base.clone(),
            dry_run: self.is_dry_run(),
        }
    }
}

fn parse_proxied(value: &str) -> Result<bool, String> {
    parse_bool(value).map_err(|e| e.to_string())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Live,
    DryRun,
}

/// Used to set the application's log level
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
