//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Resolve the current public IP
//! - [`DnsProvider`]: Read and patch DNS records via provider APIs

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{DnsProvider, DnsRecord, RecordPatch};
pub use ip_source::IpSource;
