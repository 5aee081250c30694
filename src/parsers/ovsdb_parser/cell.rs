/*!
Polymorphic cell decoding for OVSDB query results.

OVSDB collapses a one-element set into a bare atom, so the same column can
arrive as `"abc"`, `["set", []]` or `["set", ["abc", "def"]]` depending on the row.
This module inspects a raw cell once and tags it with the shape it actually has:

- `DecodedCell`: the decoded value, one variant per semantic shape.
- `CellShape`: the bare shape tag, used in mismatch reports.
- `FromCell`: normalization from a decoded cell into the Rust type a field expects
  (bare scalar promoted to a one-element list, multi-element list rejected as a scalar, ...).

Both the native JSON-RPC notation (`["uuid", ..]`, `["set", [..]]`, `["map", [[k, v], ..]]`)
and the flattened form (plain JSON arrays and objects) are accepted.
*/

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonObject, Value};
use thiserror::Error;

/// A raw cell after structural inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodedCell {
    Scalar(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
    NumericMap(BTreeMap<String, f64>),
    Bool(bool),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellShape {
    Scalar,
    List,
    Map,
    NumericMap,
    Bool,
    Number,
}

impl Display for CellShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CellShape::*;
        let name = match self {
            Scalar => "string",
            List => "list of strings",
            Map => "string map",
            NumericMap => "numeric map",
            Bool => "boolean",
            Number => "number",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },
    #[error("column '{column}' has an unsupported encoding: {raw}")]
    UnsupportedShape { column: String, raw: String },
    #[error("column '{column}' is {observed}, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: &'static str,
        observed: CellShape,
    },
}

impl DecodeError {
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, DecodeError::ColumnNotFound { .. })
    }
}

impl DecodedCell {
    pub fn shape(&self) -> CellShape {
        match self {
            DecodedCell::Scalar(_) => CellShape::Scalar,
            DecodedCell::List(_) => CellShape::List,
            DecodedCell::Map(_) => CellShape::Map,
            DecodedCell::NumericMap(_) => CellShape::NumericMap,
            DecodedCell::Bool(_) => CellShape::Bool,
            DecodedCell::Number(_) => CellShape::Number,
        }
    }

    /// Inspects a raw cell. Returns `None` when no known shape fits.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) => Some(DecodedCell::Scalar(s.clone())),
            Value::Bool(b) => Some(DecodedCell::Bool(*b)),
            Value::Number(n) => n.as_f64().map(DecodedCell::Number),
            Value::Array(items) => match tagged(items) {
                Some(("uuid" | "named-uuid", Value::String(id))) => {
                    Some(DecodedCell::Scalar(id.clone()))
                }
                Some(("set", Value::Array(members))) => decode_set(members),
                Some(("map", Value::Array(pairs))) => {
                    let pairs = pairs
                        .iter()
                        .map(|pair| match pair.as_array().map(Vec::as_slice) {
                            Some([key, value]) => atom(key).map(|key| (key, value)),
                            _ => None,
                        })
                        .collect::<Option<Vec<_>>>()?;
                    decode_map(pairs)
                }
                // Tagged notation with a malformed body
                Some(_) => None,
                None => decode_set(items),
            },
            Value::Object(object) => decode_object(object),
            Value::Null => None,
        }
    }
}

/// Splits `["<tag>", body]` when the first element is one of the OVSDB notation tags.
fn tagged(items: &[Value]) -> Option<(&str, &Value)> {
    match items {
        [Value::String(tag), body] => match tag.as_str() {
            "uuid" | "named-uuid" | "set" | "map" => Some((tag.as_str(), body)),
            _ => None,
        },
        _ => None,
    }
}

/// A set member or map key: string, uuid reference or number.
fn atom(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => match tagged(items) {
            Some(("uuid" | "named-uuid", Value::String(id))) => Some(id.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// A string-map value: string or uuid reference only, numbers go to `NumericMap`.
fn string_atom(value: &Value) -> Option<String> {
    match value {
        Value::Number(_) => None,
        other => atom(other),
    }
}

fn decode_set(members: &[Value]) -> Option<DecodedCell> {
    members
        .iter()
        .map(atom)
        .collect::<Option<Vec<_>>>()
        .map(DecodedCell::List)
}

fn decode_object(object: &JsonObject<String, Value>) -> Option<DecodedCell> {
    decode_map(object.iter().map(|(k, v)| (k.clone(), v)).collect())
}

fn decode_map(pairs: Vec<(String, &Value)>) -> Option<DecodedCell> {
    if let Some(strings) = pairs
        .iter()
        .map(|(k, v)| string_atom(v).map(|v| (k.clone(), v)))
        .collect::<Option<BTreeMap<_, _>>>()
    {
        return Some(DecodedCell::Map(strings));
    }
    pairs
        .into_iter()
        .map(|(k, v)| v.as_f64().map(|v| (k, v)))
        .collect::<Option<BTreeMap<_, _>>>()
        .map(DecodedCell::NumericMap)
}

/// Conversion from a decoded cell into the type a record field expects.
/// `from_cell` returns `None` on a shape mismatch.
pub trait FromCell: Sized {
    /// Human readable description of the accepted shape, used in mismatch errors.
    const EXPECTED: &'static str;

    fn from_cell(cell: DecodedCell) -> Option<Self>;
}

impl FromCell for String {
    const EXPECTED: &'static str = "string";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::Scalar(s) => Some(s),
            DecodedCell::List(mut items) if items.len() == 1 => items.pop(),
            _ => None,
        }
    }
}

/// Optional-scalar columns (`min: 0, max: 1` sets) arrive as an empty set when unset.
impl FromCell for Option<String> {
    const EXPECTED: &'static str = "string or empty set";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::List(items) if items.is_empty() => Some(None),
            other => String::from_cell(other).map(Some),
        }
    }
}

impl FromCell for Vec<String> {
    const EXPECTED: &'static str = "list of strings or string";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::List(items) => Some(items),
            DecodedCell::Scalar(s) => Some(vec![s]),
            _ => None,
        }
    }
}

impl FromCell for BTreeMap<String, String> {
    const EXPECTED: &'static str = "string map";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::Map(map) => Some(map),
            DecodedCell::List(items) if items.is_empty() => Some(BTreeMap::new()),
            _ => None,
        }
    }
}

impl FromCell for BTreeMap<String, f64> {
    const EXPECTED: &'static str = "numeric map";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::NumericMap(map) => Some(map),
            DecodedCell::Map(map) if map.is_empty() => Some(BTreeMap::new()),
            DecodedCell::List(items) if items.is_empty() => Some(BTreeMap::new()),
            _ => None,
        }
    }
}

impl FromCell for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::Bool(b) => Some(b),
            DecodedCell::List(items) if items.is_empty() => Some(false),
            _ => None,
        }
    }
}

impl FromCell for f64 {
    const EXPECTED: &'static str = "number";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        match cell {
            DecodedCell::Number(n) => Some(n),
            DecodedCell::List(items) if items.is_empty() => Some(0.0),
            _ => None,
        }
    }
}

/// Unverified columns: any decodable shape is accepted as-is.
impl FromCell for DecodedCell {
    const EXPECTED: &'static str = "any decodable value";

    fn from_cell(cell: DecodedCell) -> Option<Self> {
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decode(raw: Value) -> DecodedCell {
        DecodedCell::from_raw(&raw).unwrap()
    }

    #[test]
    fn test_bare_scalars() {
        assert_eq!(decode(json!("br-int")), DecodedCell::Scalar("br-int".to_string()));
        assert_eq!(decode(json!(true)), DecodedCell::Bool(true));
        assert_eq!(decode(json!(100)), DecodedCell::Number(100.0));
        assert_eq!(
            decode(json!(["uuid", "8a6a2a1e-0000-4000-8000-000000000001"])),
            DecodedCell::Scalar("8a6a2a1e-0000-4000-8000-000000000001".to_string())
        );
    }

    #[test]
    fn test_sets() {
        assert_eq!(decode(json!(["set", []])), DecodedCell::List(vec![]));
        assert_eq!(
            decode(json!(["set", [["uuid", "p1"], ["uuid", "p2"]]])),
            DecodedCell::List(vec!["p1".to_string(), "p2".to_string()])
        );
        assert_eq!(
            decode(json!(["set", [10, 20]])),
            DecodedCell::List(vec!["10".to_string(), "20".to_string()])
        );
        assert_eq!(
            decode(json!(["a", "b", "c"])),
            DecodedCell::List(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_maps() {
        let cell = decode(json!(["map", [["iface-id", "vm1"], ["owner", "nova"]]]));
        let DecodedCell::Map(map) = cell else {
            panic!("expected string map");
        };
        assert_eq!(map.get("iface-id").map(String::as_str), Some("vm1"));
        assert_eq!(map.len(), 2);

        let cell = decode(json!(["map", [["rx_packets", 10], ["tx_packets", 12]]]));
        assert_eq!(cell.shape(), CellShape::NumericMap);

        let cell = decode(json!({"rx_bytes": 5, "tx_bytes": 7.5}));
        let DecodedCell::NumericMap(map) = cell else {
            panic!("expected numeric map");
        };
        assert_eq!(map.get("tx_bytes"), Some(&7.5));

        assert_eq!(decode(json!(["map", []])), DecodedCell::Map(BTreeMap::new()));
    }

    #[test]
    fn test_unsupported_encodings() {
        assert!(DecodedCell::from_raw(&json!(null)).is_none());
        assert!(DecodedCell::from_raw(&json!(["set", [true]])).is_none());
        assert!(DecodedCell::from_raw(&json!(["set", [["a"]]])).is_none());
        assert!(DecodedCell::from_raw(&json!({"a": "x", "b": 1})).is_none());
        assert!(DecodedCell::from_raw(&json!(["uuid", 42])).is_none());
        assert!(DecodedCell::from_raw(&json!(["map", [["only-key"]]])).is_none());
    }

    #[test]
    fn test_collapsed_set_promotes_to_list() {
        let bare = Vec::<String>::from_cell(decode(json!("p1"))).unwrap();
        let single = Vec::<String>::from_cell(decode(json!(["set", ["p1"]]))).unwrap();
        assert_eq!(bare, vec!["p1".to_string()]);
        assert_eq!(bare, single);
    }

    #[test]
    fn test_scalar_rejects_multi_element_list() {
        assert!(String::from_cell(decode(json!(["set", ["a", "b"]]))).is_none());
        assert!(String::from_cell(decode(json!(["set", []]))).is_none());
        assert_eq!(
            String::from_cell(decode(json!(["set", ["a"]]))),
            Some("a".to_string())
        );
        assert!(String::from_cell(decode(json!(true))).is_none());
    }

    #[test]
    fn test_optional_scalar() {
        assert_eq!(Option::<String>::from_cell(decode(json!(["set", []]))), Some(None));
        assert_eq!(
            Option::<String>::from_cell(decode(json!("secure"))),
            Some(Some("secure".to_string()))
        );
        assert_eq!(Option::<String>::from_cell(decode(json!(["set", ["a", "b"]]))), None);
    }

    #[test]
    fn test_empty_set_defaults() {
        assert_eq!(bool::from_cell(decode(json!(["set", []]))), Some(false));
        assert_eq!(f64::from_cell(decode(json!(["set", []]))), Some(0.0));
        assert_eq!(
            BTreeMap::<String, f64>::from_cell(decode(json!(["map", []]))),
            Some(BTreeMap::new())
        );
        assert!(bool::from_cell(decode(json!("true"))).is_none());
    }
}
