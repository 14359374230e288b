//! Record normalization
//!
//! Turns one loosely-typed [`LogRecord`] into a canonical [`GelfEvent`].
//! Normalization is total: malformed reserved keys degrade to skipping the
//! feature, never to a failed event.

use super::dump::dump;
use super::event::GelfEvent;
use super::extras::{ExtraValue, IdentityLookup};
use super::record::{LogRecord, Payload};
use super::severity::GelfLevel;
use serde_json::Value;

/// Converts log records into GELF events.
///
/// Carries the deployment-wide facility label, the configured static extra
/// fields and the optional identity lookup. One normalizer instance serves
/// every flush; it holds no per-record state.
pub struct Normalizer {
    facility: String,
    static_extras: Vec<(String, ExtraValue)>,
    identity_lookup: Option<IdentityLookup>,
}

impl Normalizer {
    pub fn new(facility: impl Into<String>) -> Self {
        Self {
            facility: facility.into(),
            static_extras: Vec::new(),
            identity_lookup: None,
        }
    }

    /// Add a static extra field, applied to every event after all other
    /// steps (last write wins)
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.static_extras.push((key.into(), value.into()));
        self
    }

    pub fn with_identity_lookup(mut self, lookup: IdentityLookup) -> Self {
        self.identity_lookup = Some(lookup);
        self
    }

    pub fn facility(&self) -> &str {
        &self.facility
    }

    /// Normalize one record into an event.
    ///
    /// Field precedence, applied in this fixed order:
    /// 1. payload dispatch (text / error / structured map, including the
    ///    map's `add` entries)
    /// 2. `category` from the record — overwrites an `add`-supplied category
    /// 3. call-site trace (`trace` field; origin location only if the error
    ///    path did not already set one)
    /// 4. `username` from the identity lookup
    /// 5. static extras — applied last, overwrite everything
    pub fn normalize(&self, record: &LogRecord) -> GelfEvent {
        let mut event = dispatch(&record.payload);

        event.level = GelfLevel::from(record.severity);
        event.timestamp = record.timestamp;
        event.facility = self.facility.clone();
        event.set_additional("category", record.category.clone());

        if !record.trace.is_empty() {
            let joined = record
                .trace
                .iter()
                .map(|frame| format!("{}:{}", frame.file, frame.line))
                .collect::<Vec<_>>()
                .join("\n");
            event.set_additional("trace", joined);
            // An error-derived location wins over the call site
            if !event.has_location() {
                let first = &record.trace[0];
                event.set_location(first.file.clone(), first.line);
            }
        }

        if let Some(lookup) = &self.identity_lookup {
            match lookup() {
                Some(username) if !username.is_empty() => {
                    event.set_additional("username", username);
                }
                _ => {}
            }
        }

        for (key, value) in &self.static_extras {
            if key.is_empty() {
                continue;
            }
            let Some(resolved) = value.resolve() else {
                continue;
            };
            let rendered = match resolved {
                Value::String(s) => s,
                other => dump(&other),
            };
            if rendered.is_empty() {
                continue;
            }
            event.set_additional(key.clone(), rendered);
        }

        event
    }
}

/// Resolve the payload shape into a partially filled event.
///
/// The caller fills level/timestamp/facility afterwards; the placeholder
/// level set here is always overwritten.
fn dispatch(payload: &Payload) -> GelfEvent {
    match payload {
        Payload::Text(text) => GelfEvent::new(text.clone(), GelfLevel::Info),

        Payload::Error(err) => {
            let mut event = GelfEvent::new(
                format!("Exception {}: {}", err.type_name, err.message),
                GelfLevel::Info,
            );
            event.full_message = Some(err.full_rendering());
            if let Some(file) = &err.file {
                event.set_location(file.clone(), err.line.unwrap_or(0));
            }
            event
        }

        Payload::Map(map) => {
            let mut rest = map.clone();
            let short = rest.remove("short");
            let full = rest.remove("full");
            let add = rest.remove("add");

            let mut event = match short {
                Some(Value::String(s)) => {
                    let mut event = GelfEvent::new(s, GelfLevel::Info);
                    event.full_message = Some(dump(&Value::Object(rest)));
                    event
                }
                // Absent, or malformed (non-string): the map itself, minus
                // reserved keys, becomes the short message
                _ => GelfEvent::new(dump(&Value::Object(rest)), GelfLevel::Info),
            };

            if let Some(full) = full {
                event.full_message = Some(dump(&full));
            }

            // `add` that is not an object is skipped entirely
            if let Some(Value::Object(add_map)) = add {
                for (key, value) in add_map {
                    let rendered = match value {
                        Value::String(s) => s,
                        other => dump(&other),
                    };
                    event.set_additional(key, rendered);
                }
            }

            event
        }
    }
}
