//! Deterministic debug-string rendering of arbitrary values
//!
//! Used wherever a loosely-typed value has to land in a string-only GELF
//! field: structured payloads without a `short` key, `full` overrides, and
//! non-string `add`/extra values. The output is a human-readable dump, not
//! JSON, and is stable for the same input.

use serde_json::Value;
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Render any JSON value as a human-readable dump.
///
/// Scalars render inline; maps and sequences render as indented multi-line
/// blocks with `'key' => value` entries. An empty map or sequence renders as
/// `[]`. This function is total.
pub fn dump(value: &Value) -> String {
    let mut out = String::new();
    render(value, 0, &mut out);
    out
}

fn render(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        Value::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::String(s) => render_str(s, out),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for item in items {
                indent(depth + 1, out);
                render(item, depth + 1, out);
                out.push_str(",\n");
            }
            indent(depth, out);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (key, item) in map {
                indent(depth + 1, out);
                render_str(key, out);
                out.push_str(" => ");
                render(item, depth + 1, out);
                out.push_str(",\n");
            }
            indent(depth, out);
            out.push(']');
        }
    }
}

fn render_str(s: &str, out: &mut String) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('\'');
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dump_scalars() {
        assert_eq!(dump(&json!(null)), "null");
        assert_eq!(dump(&json!(true)), "true");
        assert_eq!(dump(&json!(42)), "42");
        assert_eq!(dump(&json!(1.5)), "1.5");
        assert_eq!(dump(&json!("hello")), "'hello'");
    }

    #[test]
    fn test_dump_escapes_quotes() {
        assert_eq!(dump(&json!("it's")), r"'it\'s'");
        assert_eq!(dump(&json!(r"a\b")), r"'a\\b'");
    }

    #[test]
    fn test_dump_empty_containers() {
        assert_eq!(dump(&json!({})), "[]");
        assert_eq!(dump(&json!([])), "[]");
    }

    #[test]
    fn test_dump_flat_map() {
        let rendered = dump(&json!({"a": 1, "b": "two"}));
        assert_eq!(rendered, "[\n    'a' => 1,\n    'b' => 'two',\n]");
    }

    #[test]
    fn test_dump_nested() {
        let rendered = dump(&json!({"outer": {"inner": [1, 2]}}));
        assert_eq!(
            rendered,
            "[\n    'outer' => [\n        'inner' => [\n            1,\n            2,\n        ],\n    ],\n]"
        );
    }

    #[test]
    fn test_dump_is_stable() {
        let value = json!({"z": 1, "a": {"nested": true}, "m": [null, "x"]});
        assert_eq!(dump(&value), dump(&value.clone()));
    }
}
