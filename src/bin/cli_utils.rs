use mmdb::Value;
use serde_json::json;

/// Convert a decoded value into a `serde_json::Value` for CLI output.
/// `u128`/raw bytes have no exact JSON number/string representation, so
/// they're rendered as strings/base64-free hex, matching how the
/// reference tooling prints values it can't round-trip losslessly.
pub fn value_to_json(value: &Value<'_>) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Double(d) => json!(d),
        Value::Bytes(b) => json!(hex_string(b)),
        Value::Uint16(n) => json!(n),
        Value::Uint32(n) => json!(n),
        Value::Int32(n) => json!(n),
        Value::Uint64(n) => json!(n),
        Value::Uint128(n) => json!(n.to_string()),
        Value::Bool(b) => json!(b),
        Value::Float(f) => json!(f),
        Value::Map(entries) => {
            let mut map = serde_json::Map::new();
            for (k, v) in entries {
                map.insert((*k).to_string(), value_to_json(v));
            }
            serde_json::Value::Object(map)
        }
        Value::Array(items) => json!(items.iter().map(value_to_json).collect::<Vec<_>>()),
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Split a dotted lookup path (`country.iso_code`) into path segments.
/// An empty string means "the whole entry".
pub fn parse_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}
