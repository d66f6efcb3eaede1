// # ddns-core
//
// Core library for the one-shot DDNS updater.
//
// ## Architecture Overview
//
// A single invocation performs one reconciliation pass:
// - **IpSource**: Trait for resolving the host's current public IP
// - **DnsProvider**: Trait for reading and patching a DNS record via a provider API
// - **Reconciler**: Resolves the IP, reads the record, compares, and writes only on mismatch
//
// ## Design Principles
//
// 1. **Stateless**: Nothing is persisted between invocations
// 2. **Fail fast**: Every error propagates to the caller, nothing is retried here
// 3. **Library-First**: Concrete sources and providers live in their own crates
// 4. **Idempotency**: An unchanged IP never results in a write

pub mod address;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod traits;

// Re-export core types for convenience
pub use config::{IpSourceConfig, RecordType, ResponseFormat, UpdaterConfig};
pub use error::{Error, Result};
pub use reconcile::Reconciler;
pub use traits::{DnsProvider, DnsRecord, IpSource, RecordPatch};
