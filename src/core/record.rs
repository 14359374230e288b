//! Log record structure supplied by the host logging pipeline

use super::severity::Severity;
use chrono::Utc;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt::Write as _;

/// One call-site frame captured by the host pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub file: String,
    pub line: u32,
}

impl TraceFrame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// An error-valued payload, captured eagerly so the record owns its data.
///
/// Host pipelines hand over errors of arbitrary concrete types; the exporter
/// only needs the type name, the message, an optional origin location and an
/// optional verbose rendering (backtrace, source chain).
#[derive(Debug, Clone)]
pub struct ErrorPayload {
    pub type_name: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub backtrace: Option<String>,
}

impl ErrorPayload {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            file: None,
            line: None,
            backtrace: None,
        }
    }

    /// Capture any [`std::error::Error`], walking its source chain into the
    /// verbose rendering.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let mut backtrace = format!("{}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            // write! to a String cannot fail
            let _ = write!(backtrace, "\nCaused by: {}", cause);
            source = cause.source();
        }
        Self {
            type_name: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            file: None,
            line: None,
            backtrace: Some(backtrace),
        }
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// The full string representation used as the event's `full_message`
    pub fn full_rendering(&self) -> String {
        match &self.backtrace {
            Some(bt) => bt.clone(),
            None => format!("{}: {}", self.type_name, self.message),
        }
    }
}

/// The loosely-typed payload of a log record, resolved to one of three
/// shapes up front rather than probed at every use site.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Plain human-written text
    Text(String),
    /// An error or exception value
    Error(ErrorPayload),
    /// A structured key-value map, possibly carrying the reserved
    /// `short`/`full`/`add` keys
    Map(Map<String, Value>),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<ErrorPayload> for Payload {
    fn from(err: ErrorPayload) -> Self {
        Payload::Error(err)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Map(map)
    }
}

/// One log occurrence as produced by the host pipeline.
///
/// The exporter never mutates a record; normalization reads it and builds a
/// fresh event.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub payload: Payload,
    pub severity: Severity,
    pub category: String,
    /// Epoch seconds with fractional part
    pub timestamp: f64,
    /// Call-site frames, outermost first; may be empty
    pub trace: Vec<TraceFrame>,
}

impl LogRecord {
    pub fn new(payload: impl Into<Payload>, severity: Severity, category: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            severity,
            category: category.into(),
            timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            trace: Vec::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_trace(mut self, trace: Vec<TraceFrame>) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_text() {
        let record = LogRecord::new("ready", Severity::Info, "app");
        assert!(matches!(record.payload, Payload::Text(ref t) if t == "ready"));
        assert!(record.trace.is_empty());
        assert!(record.timestamp > 0.0);
    }

    #[test]
    fn test_error_payload_from_std_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let payload = ErrorPayload::from_error(&io_err);

        assert!(payload.type_name.contains("Error"));
        assert_eq!(payload.message, "missing file");
        assert!(payload.full_rendering().contains("missing file"));
    }

    #[test]
    fn test_error_payload_source_chain() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "request failed")
            }
        }

        impl StdError for Outer {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "peer went away",
        ));
        let payload = ErrorPayload::from_error(&err);
        let full = payload.full_rendering();

        assert!(full.starts_with("request failed"));
        assert!(full.contains("Caused by: peer went away"));
    }

    #[test]
    fn test_record_builders() {
        let record = LogRecord::new("boot", Severity::Warning, "startup")
            .with_timestamp(1700000000.25)
            .with_trace(vec![TraceFrame::new("main.rs", 7)]);

        assert_eq!(record.timestamp, 1700000000.25);
        assert_eq!(record.trace[0], TraceFrame::new("main.rs", 7));
    }
}
