//! Input normalization — turning loosely-typed caller argument maps into
//! something the tool's typed input can be built from.
//!
//! Orchestration callers are forgiving about types: booleans arrive as
//! strings, integers arrive quoted, structured filters arrive where a
//! string is declared, and legacy top-level fields duplicate nested ones.
//! Normalization runs before strict validation, so anything that still
//! cannot coerce surfaces later as a validation error on the typed
//! construction — never as a silent panic mid-execution.
//!
//! Rules, in order:
//! 1. Strict allow-listing: keys not declared in the schema's
//!    `properties` are dropped, not errored.
//! 2. Declared legacy-field relocations ([`InputFixup`]) are applied.
//!    These are explicit and per-tool — nothing is relocated implicitly.
//! 3. Type coercion per declared property type (string/boolean/integer).

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::tool::InputFixup;

/// Normalize a raw argument map against a tool's input schema.
///
/// Always returns an object; a non-object argument value is treated as
/// the empty map.
pub fn normalize_arguments(schema: &Value, args: Value, fixups: &[InputFixup]) -> Value {
    let raw = match args {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let empty = Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    // 1. Drop anything not in the declared property set.
    let mut normalized: Map<String, Value> = raw
        .iter()
        .filter(|(key, _)| properties.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    // 2. Tool-declared legacy relocations. The source is read from the
    //    *raw* map because it is, by definition, not a declared property.
    for fixup in fixups {
        apply_fixup(&raw, &mut normalized, fixup);
    }

    // 3. Per-type coercion.
    for (key, value) in normalized.iter_mut() {
        let declared = properties
            .get(key)
            .and_then(|p| p.get("type"))
            .and_then(Value::as_str);
        match declared {
            Some("string") => coerce_string_field(key, value),
            Some("boolean") => {
                *value = match coerce_bool(value) {
                    Some(b) => Value::Bool(b),
                    None => Value::Null,
                };
            }
            Some("integer") => {
                *value = match coerce_int(value) {
                    Some(n) => Value::from(n),
                    None => Value::Null,
                };
            }
            _ => {}
        }
    }

    Value::Object(normalized)
}

/// Move `fixup.source` from the raw top level into the nested target
/// object, unless the nested object already sets that field. The source
/// key never survives at the top level (it is undeclared and was dropped
/// by the allow-list step already).
fn apply_fixup(raw: &Map<String, Value>, normalized: &mut Map<String, Value>, fixup: &InputFixup) {
    let Some(value) = raw.get(fixup.source) else {
        return;
    };
    warn!(
        source = fixup.source,
        target = fixup.target_object,
        field = fixup.target_field,
        "legacy top-level field relocated into nested object"
    );

    let target = normalized
        .entry(fixup.target_object.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(obj) = target {
        if !obj.contains_key(fixup.target_field) {
            obj.insert(fixup.target_field.to_string(), value.clone());
        }
    }
    // A non-object target (e.g. a JSON-string filter) is left untouched.
}

/// String-declared fields accept structured values: objects and arrays
/// are serialized to a JSON string so the caller's structured filter
/// round-trips through the string-typed contract.
fn coerce_string_field(key: &str, value: &mut Value) {
    if value.is_object() || value.is_array() {
        debug!(field = key, "serializing structured value to JSON string");
        let serialized = value.to_string();
        *value = Value::String(serialized);
    }
}

/// Lenient boolean coercion: native booleans and case-insensitive
/// `"true"`/`"false"` strings. Everything else is `None`.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Lenient integer coercion: native integers and digit-only strings
/// (with an optional leading sign). Everything else is `None`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
