// # ddns-update - one-shot DDNS updater
//
// Thin integration layer: parses options, installs logging, runs exactly one
// reconciliation pass and turns the outcome into an exit code. Meant to be
// scheduled externally (cron, systemd timer); it never loops or retries.
//
// ## Configuration
//
// Every option is a flag with an environment fallback. A `.env` file in the
// working directory is loaded first; variables already set win over it.
//
// - `DDNS_API_TOKEN`, `DDNS_ZONE_ID`, `DDNS_RECORD_NAME` (required)
// - `DDNS_RECORD_TYPE` (A or AAAA), `DDNS_RECORD_ID`, `DDNS_TTL`, `DDNS_PROXIED`
// - `DDNS_IP_SOURCE_URL`, `DDNS_IP_SOURCE_FORMAT` (text or json)
// - `DDNS_API_BASE`, `DDNS_MODE` (live or dry-run), `DDNS_LOG_LEVEL`
//
// ## Example
//
// ```bash
// export DDNS_API_TOKEN=your_token
// export DDNS_ZONE_ID=023e105f4ecef8ad9ca31a8372d0c353
// export DDNS_RECORD_NAME=home.example.com
//
// ddns-update --dry-run
// ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use ddns_core::DnsRecord;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;

/// Exit codes for different termination scenarios
///
/// - 0: Record updated or already current
/// - 1: Configuration or authentication error (needs operator action)
/// - 2: Runtime error (network, provider, lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let env_file = dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version end up here too
            let _ = e.print();
            return if e.use_stderr() {
                DdnsExitCode::ConfigError.into()
            } else {
                DdnsExitCode::Success.into()
            };
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(cli.log_level))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path.display());
    }

    match run(&cli) {
        Ok(outcome) => {
            info!(
                "{}",
                describe_outcome(outcome.as_ref(), &cli.record_name, cli.is_dry_run())
            );
            DdnsExitCode::Success.into()
        }
        Err(e) => {
            error!("{:#}", e);
            if e.downcast_ref::<ddns_core::Error>()
                .is_some_and(ddns_core::Error::is_transient)
            {
                warn!("This failure looks temporary; the next scheduled run may succeed");
            }
            exit_code_for(&e).into()
        }
    }
}

/// Run one reconciliation pass on a current-thread runtime
fn run(cli: &Cli) -> Result<Option<DnsRecord>> {
    let config = cli.updater_config().context("Invalid configuration")?;
    let options = cli.update_options();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let outcome = runtime
        .block_on(ddns_update::update_dns_ip_with(&config, &options))
        .with_context(|| format!("Failed to update {}", config.record_name))?;

    Ok(outcome)
}

fn describe_outcome(outcome: Option<&DnsRecord>, record_name: &str, dry_run: bool) -> String {
    match outcome {
        Some(record) if dry_run => format!(
            "[DRY-RUN] Would update {} ({}) to {}",
            record.name, record.record_type, record.content
        ),
        Some(record) => format!(
            "Updated {} ({}) to {}",
            record.name, record.record_type, record.content
        ),
        None => format!("Record {} is up to date", record_name),
    }
}

fn exit_code_for(err: &anyhow::Error) -> DdnsExitCode {
    match err.downcast_ref::<ddns_core::Error>() {
        Some(ddns_core::Error::Config(_)) | Some(ddns_core::Error::Authentication(_)) => {
            DdnsExitCode::ConfigError
        }
        _ => DdnsExitCode::RuntimeError,
    }
}
