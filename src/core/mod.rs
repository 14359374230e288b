//! Core exporter types: records, events, normalization

pub mod dump;
pub mod error;
pub mod event;
pub mod extras;
pub mod normalizer;
pub mod record;
pub mod severity;

pub use error::{GelfError, Result};
pub use event::{GelfEvent, UNKNOWN_FILE};
pub use extras::{ExtraProvider, ExtraValue, IdentityLookup};
pub use normalizer::Normalizer;
pub use record::{ErrorPayload, LogRecord, Payload, TraceFrame};
pub use severity::{GelfLevel, Severity};
