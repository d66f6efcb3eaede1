// # IP Source Trait
//
// Defines the interface for resolving the host's current public IP.
//
// ## Implementations
//
// - HTTP echo services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let current_ip = source.current().await?;
//     println!("Public IP: {}", current_ip);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for public-IP resolvers
///
/// # Contract
///
/// - One outbound request per call to [`IpSource::current`]
/// - No caching across calls, no retry
/// - Transport failures and non-2xx answers are [`crate::Error::Network`]
/// - A body that is not an IP address is [`crate::Error::Format`]
///
/// The reconciler calls `current()` exactly once per pass, before any
/// provider call. A failure here ends the pass with no provider traffic.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current public IP address
    async fn current(&self) -> Result<IpAddr, crate::Error>;

    /// Short name of the source (for logging)
    fn source_name(&self) -> &str;
}
