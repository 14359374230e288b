//! Canonical structured event in GELF form

use super::error::Result;
use super::severity::GelfLevel;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Sentinel origin used when neither an error value nor a call-site trace
/// supplied a location
pub const UNKNOWN_FILE: &str = "unknown";

/// One normalized log occurrence, ready for serialization.
///
/// Built by the normalizer, owned by the exporter for the duration of one
/// flush cycle and discarded after it has been encoded.
#[derive(Debug, Clone)]
pub struct GelfEvent {
    pub short_message: String,
    pub full_message: Option<String>,
    /// Epoch seconds with fractional part
    pub timestamp: f64,
    pub level: GelfLevel,
    pub facility: String,
    pub file: String,
    pub line: u32,
    /// Custom fields; values are always strings, last write per key wins
    pub additional: BTreeMap<String, String>,
}

impl GelfEvent {
    pub fn new(short_message: impl Into<String>, level: GelfLevel) -> Self {
        Self {
            short_message: short_message.into(),
            full_message: None,
            timestamp: 0.0,
            level,
            facility: String::new(),
            file: UNKNOWN_FILE.to_string(),
            line: 0,
            additional: BTreeMap::new(),
        }
    }

    /// Whether anything has set an origin location yet
    pub fn has_location(&self) -> bool {
        self.file != UNKNOWN_FILE || self.line != 0
    }

    pub fn set_location(&mut self, file: impl Into<String>, line: u32) {
        self.file = file.into();
        self.line = line;
    }

    /// Insert a custom field, overwriting any earlier value for the key
    pub fn set_additional(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.additional.insert(key.into(), value.into());
    }

    /// Build the GELF 1.1 wire object.
    ///
    /// Every additional field is emitted under a `_` prefix. GELF reserves
    /// `_id`, so an additional key of `id` is dropped here rather than
    /// rejected upstream.
    pub fn to_wire(&self, host: &str) -> Value {
        let mut wire = Map::new();
        wire.insert("version".into(), json!("1.1"));
        wire.insert("host".into(), json!(host));
        wire.insert("short_message".into(), json!(self.short_message));
        if let Some(full) = &self.full_message {
            wire.insert("full_message".into(), json!(full));
        }
        wire.insert("timestamp".into(), json!(self.timestamp));
        wire.insert("level".into(), json!(self.level.priority()));
        wire.insert("facility".into(), json!(self.facility));
        wire.insert("file".into(), json!(self.file));
        wire.insert("line".into(), json!(self.line));
        for (key, value) in &self.additional {
            if key == "id" {
                continue;
            }
            wire.insert(format!("_{}", key), json!(value));
        }
        Value::Object(wire)
    }

    /// UTF-8 encode the wire object
    pub fn to_bytes(&self, host: &str) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_wire(host))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_minimum_fields() {
        let mut event = GelfEvent::new("it happened", GelfLevel::Info);
        event.timestamp = 1700000000.5;
        event.facility = "app-logs".to_string();

        let wire = event.to_wire("web-1");
        assert_eq!(wire["version"], "1.1");
        assert_eq!(wire["host"], "web-1");
        assert_eq!(wire["short_message"], "it happened");
        assert_eq!(wire["timestamp"], 1700000000.5);
        assert_eq!(wire["level"], 6);
        assert_eq!(wire["facility"], "app-logs");
        assert_eq!(wire["file"], UNKNOWN_FILE);
        assert_eq!(wire["line"], 0);
        assert!(wire.get("full_message").is_none());
    }

    #[test]
    fn test_wire_additional_prefix() {
        let mut event = GelfEvent::new("x", GelfLevel::Error);
        event.set_additional("category", "db");
        event.set_additional("username", "alice");

        let wire = event.to_wire("h");
        assert_eq!(wire["_category"], "db");
        assert_eq!(wire["_username"], "alice");
        assert!(wire.get("category").is_none());
    }

    #[test]
    fn test_wire_skips_reserved_id() {
        let mut event = GelfEvent::new("x", GelfLevel::Debug);
        event.set_additional("id", "42");
        event.set_additional("request_id", "abc");

        let wire = event.to_wire("h");
        assert!(wire.get("_id").is_none());
        assert_eq!(wire["_request_id"], "abc");
    }

    #[test]
    fn test_additional_last_write_wins() {
        let mut event = GelfEvent::new("x", GelfLevel::Info);
        event.set_additional("k", "first");
        event.set_additional("k", "second");
        assert_eq!(event.additional["k"], "second");
    }

    #[test]
    fn test_location_tracking() {
        let mut event = GelfEvent::new("x", GelfLevel::Info);
        assert!(!event.has_location());

        event.set_location("lib.rs", 12);
        assert!(event.has_location());
        assert_eq!(event.file, "lib.rs");
        assert_eq!(event.line, 12);
    }

    #[test]
    fn test_to_bytes_is_utf8_json() {
        let mut event = GelfEvent::new("héllo", GelfLevel::Info);
        event.facility = "f".to_string();

        let bytes = event.to_bytes("h").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed["short_message"], "héllo");
    }
}
