//! Test doubles and common utilities for reconciler contract tests
//!
//! The doubles count every call so tests can assert on provider traffic,
//! not only on return values.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsProvider, DnsRecord, IpSource, RecordPatch};
use ddns_core::{RecordType, UpdaterConfig};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const RECORD_NAME: &str = "home.example.com";

/// What a [`StaticIpSource`] answers with
#[derive(Debug, Clone)]
enum IpAnswer {
    Ip(IpAddr),
    NetworkFailure,
    FormatFailure,
}

/// An IpSource with a fixed answer
pub struct StaticIpSource {
    answer: IpAnswer,
    /// Call counter for current()
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    /// Always resolves to `ip`
    pub fn new(ip: &str) -> Self {
        Self::with_answer(IpAnswer::Ip(ip.parse().expect("valid test IP")))
    }

    /// Always fails as if the echo service were unreachable
    pub fn unreachable() -> Self {
        Self::with_answer(IpAnswer::NetworkFailure)
    }

    /// Always fails as if the echo service returned garbage
    pub fn malformed() -> Self {
        Self::with_answer(IpAnswer::FormatFailure)
    }

    fn with_answer(answer: IpAnswer) -> Self {
        Self {
            answer,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new StaticIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            answer: other.answer.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<IpAddr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            IpAnswer::Ip(ip) => Ok(*ip),
            IpAnswer::NetworkFailure => Err(Error::network("connection refused")),
            IpAnswer::FormatFailure => Err(Error::format("Invalid IP address: <html>")),
        }
    }

    fn source_name(&self) -> &str {
        "static"
    }
}

/// A mock DnsProvider backed by an in-memory zone
pub struct MockDnsProvider {
    /// Records in the zone
    records: Arc<Mutex<Vec<DnsRecord>>>,
    /// Call counter for list_records()
    list_call_count: Arc<AtomicUsize>,
    /// Call counter for get_record()
    get_call_count: Arc<AtomicUsize>,
    /// Recorded (record_id, patch) pairs from update calls
    patches: Arc<Mutex<Vec<(String, RecordPatch)>>>,
    /// Error returned by every read, if set
    read_failure: Option<fn() -> Error>,
    /// Error returned by every update, if set
    update_failure: Option<fn() -> Error>,
}

impl MockDnsProvider {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            list_call_count: Arc::new(AtomicUsize::new(0)),
            get_call_count: Arc::new(AtomicUsize::new(0)),
            patches: Arc::new(Mutex::new(Vec::new())),
            read_failure: None,
            update_failure: None,
        }
    }

    /// Make every read fail with the error built by `failure`
    pub fn failing_reads(mut self, failure: fn() -> Error) -> Self {
        self.read_failure = Some(failure);
        self
    }

    /// Make every update fail with the error built by `failure`
    pub fn failing_updates(mut self, failure: fn() -> Error) -> Self {
        self.update_failure = Some(failure);
        self
    }

    /// Get the number of times list_records() was called
    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times get_record() was called
    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.patches.lock().unwrap().len()
    }

    /// Total number of provider calls of any kind
    pub fn total_call_count(&self) -> usize {
        self.list_call_count() + self.get_call_count() + self.update_call_count()
    }

    /// Get the patches sent so far
    pub fn patches(&self) -> Vec<(String, RecordPatch)> {
        self.patches.lock().unwrap().clone()
    }

    /// Current state of a record in the zone
    pub fn record(&self, id: &str) -> Option<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Create a new MockDnsProvider that shares state and counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            records: Arc::clone(&other.records),
            list_call_count: Arc::clone(&other.list_call_count),
            get_call_count: Arc::clone(&other.get_call_count),
            patches: Arc::clone(&other.patches),
            read_failure: other.read_failure,
            update_failure: other.update_failure,
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_records(
        &self,
        _zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.read_failure {
            return Err(failure());
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name && r.record_type == record_type)
            .cloned()
            .collect())
    }

    async fn get_record(&self, _zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.read_failure {
            return Err(failure());
        }

        self.record(record_id)
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", record_id)))
    }

    async fn update_record(
        &self,
        _zone_id: &str,
        record_id: &str,
        patch: &RecordPatch,
    ) -> Result<DnsRecord> {
        self.patches
            .lock()
            .unwrap()
            .push((record_id.to_string(), patch.clone()));
        if let Some(failure) = self.update_failure {
            return Err(failure());
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", record_id)))?;

        *record = record.with_patch(patch);
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Build a record in the test zone
pub fn record(id: &str, record_type: RecordType, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: RECORD_NAME.to_string(),
        record_type,
        content: content.to_string(),
        ttl: 300,
        proxied: Some(false),
        modified_on: None,
    }
}

/// Helper to create a minimal UpdaterConfig for testing
pub fn minimal_config() -> UpdaterConfig {
    UpdaterConfig::new("test-token", ZONE_ID, RECORD_NAME)
}
