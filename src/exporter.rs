//! Batch export of log records
//!
//! The exporter owns the configured transport, normalizes each record of a
//! batch and attempts delivery exactly once per record. Failures are
//! recorded per record and never abort the rest of the batch.

use crate::core::{GelfError, LogRecord, Normalizer, Result};
use crate::transports::{build_transport, Transport, TransportConfig};
use parking_lot::Mutex;

/// One failed delivery inside a flush
#[derive(Debug)]
pub struct DeliveryError {
    /// Position of the record in the flushed batch
    pub index: usize,
    /// The record's category, for host-side alerting
    pub category: String,
    pub source: GelfError,
}

/// Outcome of one flush: every record was attempted, none will be retried
#[derive(Debug, Default)]
pub struct FlushResult {
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<DeliveryError>,
}

impl FlushResult {
    /// Whether every record in the batch was delivered
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Normalizes and delivers batches of log records.
///
/// The transport sits behind a mutex, so concurrent flushes from multiple
/// threads serialize instead of interleaving on one socket. The connection
/// is opened at the start of a flush and closed at the end, amortizing
/// setup across the batch rather than per record.
pub struct Exporter {
    normalizer: Normalizer,
    transport: Mutex<Box<dyn Transport>>,
    host: String,
}

impl Exporter {
    /// Build an exporter from a transport configuration.
    ///
    /// All configuration validation happens here; an unsupported transport
    /// kind or invalid TLS material never reaches a flush.
    pub fn new(config: &TransportConfig, normalizer: Normalizer) -> Result<Self> {
        let transport = build_transport(config)?;
        Ok(Self::with_transport(transport, normalizer))
    }

    /// Build an exporter around an already-constructed transport
    pub fn with_transport(transport: Box<dyn Transport>, normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            transport: Mutex::new(transport),
            host: local_hostname(),
        }
    }

    /// Override the GELF `host` field (defaults to the local hostname)
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Deliver a batch of records, best effort, in order.
    ///
    /// Opens the transport once, attempts every record exactly once and
    /// returns after the last attempt. A failure to open the transport
    /// fails the whole batch; a per-record failure is recorded and the
    /// remaining records are still attempted.
    pub fn flush(&self, records: &[LogRecord]) -> FlushResult {
        let mut result = FlushResult::default();
        if records.is_empty() {
            return result;
        }

        let mut transport = self.transport.lock();

        if let Err(e) = transport.open() {
            let message = e.to_string();
            let name = transport.name();
            for (index, record) in records.iter().enumerate() {
                result.errors.push(DeliveryError {
                    index,
                    category: record.category.clone(),
                    source: GelfError::transport(name, message.clone()),
                });
            }
            result.failed = records.len();
            return result;
        }

        for (index, record) in records.iter().enumerate() {
            let event = self.normalizer.normalize(record);
            let attempt = event
                .to_bytes(&self.host)
                .and_then(|payload| transport.send(&payload));

            match attempt {
                Ok(()) => result.sent += 1,
                Err(source) => {
                    result.failed += 1;
                    result.errors.push(DeliveryError {
                        index,
                        category: record.category.clone(),
                        source,
                    });
                }
            }
        }

        // Connection-per-flush; a close failure has nothing left to fail
        let _ = transport.close();
        result
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
