//! Helpers for the nested configuration tree.
//!
//! The tree is a `serde_json` object map. With the `preserve_order` feature
//! enabled, keys iterate in insertion order, which is the "stored order" the
//! rest of the crate relies on.

use serde_json::{Map, Value};

/// A nested configuration mapping.
pub type ConfigTree = Map<String, Value>;

/// Recursively merges `overlay` into `base`.
///
/// When both sides hold a mapping under the same key the mappings are merged
/// key by key; any other overlay value replaces the base value entirely.
pub fn merge(base: &mut ConfigTree, overlay: ConfigTree) {
    for (key, overlay_val) in overlay {
        match overlay_val {
            Value::Object(overlay_map) => {
                if let Some(Value::Object(base_map)) = base.get_mut(&key) {
                    merge(base_map, overlay_map);
                    continue;
                }
                base.insert(key, Value::Object(overlay_map));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

/// Looks up a dotted path, returning `None` as soon as a segment is absent.
#[must_use]
pub fn lookup<'a>(tree: &'a ConfigTree, dotted: &str) -> Option<&'a Value> {
    let mut segments = dotted.split('.');
    let first = segments.next()?;
    let mut current = tree.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Writes `value` at a dotted path, creating intermediate mappings.
///
/// An intermediate segment holding a non-mapping value is replaced by an
/// empty mapping.
pub fn assign(tree: &mut ConfigTree, dotted: &str, value: Value) {
    let segments: Vec<&str> = dotted.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = tree;
    for segment in parents {
        let slot = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert((*leaf).to_string(), value);
}

/// Loose truthiness used for flags such as `enabled`.
///
/// `null`, `false`, `0`, the empty string, and empty collections are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
