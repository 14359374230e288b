//! Static extra fields and the injected identity lookup
//!
//! Extra fields configured on the exporter may be literals or zero-argument
//! providers evaluated per record. The identity lookup is the same idea
//! specialized to "who is the current user" — a capability handed in by the
//! host instead of a global session singleton.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Zero-argument provider for a dynamically resolved extra value
pub type ExtraProvider = Arc<dyn Fn() -> Option<Value> + Send + Sync>;

/// Resolves the current actor identity, if any.
///
/// Returning `None` (or an empty string) means "no username" and is never
/// treated as an error.
pub type IdentityLookup = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// A configured extra-field value: a literal, or a provider invoked once per
/// normalized record
#[derive(Clone)]
pub enum ExtraValue {
    Literal(Value),
    Provider(ExtraProvider),
}

impl ExtraValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        ExtraValue::Literal(value.into())
    }

    pub fn provider<F>(f: F) -> Self
    where
        F: Fn() -> Option<Value> + Send + Sync + 'static,
    {
        ExtraValue::Provider(Arc::new(f))
    }

    /// Resolve to a concrete value; `None` means the field is skipped
    pub fn resolve(&self) -> Option<Value> {
        match self {
            ExtraValue::Literal(Value::Null) => None,
            ExtraValue::Literal(value) => Some(value.clone()),
            ExtraValue::Provider(f) => match f() {
                Some(Value::Null) | None => None,
                Some(value) => Some(value),
            },
        }
    }
}

impl fmt::Debug for ExtraValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ExtraValue::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(s: &str) -> Self {
        ExtraValue::Literal(Value::String(s.to_string()))
    }
}

impl From<String> for ExtraValue {
    fn from(s: String) -> Self {
        ExtraValue::Literal(Value::String(s))
    }
}

impl From<Value> for ExtraValue {
    fn from(value: Value) -> Self {
        ExtraValue::Literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_resolution() {
        let value = ExtraValue::literal("staging");
        assert_eq!(value.resolve(), Some(json!("staging")));
    }

    #[test]
    fn test_null_literal_is_skipped() {
        let value = ExtraValue::Literal(Value::Null);
        assert_eq!(value.resolve(), None);
    }

    #[test]
    fn test_provider_resolution() {
        let value = ExtraValue::provider(|| Some(json!(7)));
        assert_eq!(value.resolve(), Some(json!(7)));

        let absent = ExtraValue::provider(|| None);
        assert_eq!(absent.resolve(), None);
    }

    #[test]
    fn test_provider_invoked_each_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let value = ExtraValue::provider(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            Some(json!("v"))
        });

        value.resolve();
        value.resolve();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
