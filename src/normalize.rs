// src/normalize.rs
// Converts Dialogflow's protobuf-Struct JSON encoding into plain JSON.

use serde_json::{Map, Value};

/// Flatten a tagged Struct value into an ordinary JSON value.
///
/// Dialogflow encodes structured data as a tree of tagged fields:
/// `{"fields": {"city": {"kind": "stringValue", "stringValue": "Paris"}}}`.
/// Every recognized tag maps to exactly one JSON shape; a field with an
/// unrecognized tag is passed through unchanged rather than dropped, so new
/// value kinds degrade to their raw encoding instead of failing the request.
pub fn struct_to_json(value: &Value) -> Value {
    let Some(fields) = value.get("fields").and_then(Value::as_object) else {
        // No field-map: either a bare wrapper or an already-simple value
        // (e.g. inside a list).
        if let Some(nested) = value.get("structValue") {
            return struct_to_json(nested);
        }
        if let Some(s) = value.get("stringValue") {
            return s.clone();
        }
        return value.clone();
    };

    let mut json = Map::new();
    for (key, field) in fields {
        let converted = match field.get("kind").and_then(Value::as_str) {
            Some("stringValue") => field.get("stringValue").cloned().unwrap_or(Value::Null),
            Some("numberValue") => field.get("numberValue").cloned().unwrap_or(Value::Null),
            Some("boolValue") => field.get("boolValue").cloned().unwrap_or(Value::Null),
            Some("nullValue") => Value::Null,
            Some("listValue") => {
                let values = field
                    .get("listValue")
                    .and_then(|list| list.get("values"))
                    .and_then(Value::as_array);
                Value::Array(
                    values
                        .map(|vs| vs.iter().map(struct_to_json).collect())
                        .unwrap_or_default(),
                )
            }
            Some("structValue") => field
                .get("structValue")
                .map(struct_to_json)
                .unwrap_or(Value::Null),
            // Forward compatibility: keep the raw field for tags this build
            // does not know about.
            _ => field.clone(),
        };
        json.insert(key.clone(), converted);
    }
    Value::Object(json)
}
