//! # GELF Exporter
//!
//! Normalizes heterogeneous application log records into GELF events and
//! delivers them to a Graylog-style collector over a selectable transport.
//!
//! ## Features
//!
//! - **Record Normalization**: plain text, error values and structured maps
//!   all collapse to one canonical event shape
//! - **Pluggable Transports**: UDP (chunked, best effort), TCP (null-byte
//!   framed stream), HTTP/HTTPS (optional basic auth and TLS policy)
//! - **Best-Effort Batches**: per-record delivery failures are reported,
//!   never retried, and never abort the rest of a flush
//!
//! ## Example
//!
//! ```no_run
//! use gelf_exporter::prelude::*;
//!
//! let config = TransportConfig::udp("graylog.internal", 12201);
//! let normalizer = Normalizer::new("my-app").with_extra("environment", "production");
//! let exporter = Exporter::new(&config, normalizer).expect("valid configuration");
//!
//! let records = vec![LogRecord::new("service started", Severity::Info, "startup")];
//! let result = exporter.flush(&records);
//! assert!(result.is_complete());
//! ```

pub mod core;
pub mod exporter;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        ErrorPayload, ExtraValue, GelfError, GelfEvent, GelfLevel, IdentityLookup, LogRecord,
        Normalizer, Payload, Result, Severity, TraceFrame,
    };
    pub use crate::exporter::{DeliveryError, Exporter, FlushResult};
    pub use crate::transports::{
        BasicAuth, TlsOptions, Transport, TransportConfig, TransportKind,
    };
}

pub use crate::core::{
    ErrorPayload, ExtraValue, GelfError, GelfEvent, GelfLevel, IdentityLookup, LogRecord,
    Normalizer, Payload, Result, Severity, TraceFrame,
};
pub use crate::exporter::{DeliveryError, Exporter, FlushResult};
pub use crate::transports::{BasicAuth, TlsOptions, Transport, TransportConfig, TransportKind};
