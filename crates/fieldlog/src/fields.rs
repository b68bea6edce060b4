//! Field encoding: interleaved key/value items into a field map.
//!
//! Call sites pass fields as a flat, alternating sequence
//! (`key, value, key, value, ...`). The encoder keeps only well-formed pairs:
//! a pair is accepted when its key is a JSON string, an unpaired trailing item
//! is ignored and later keys overwrite earlier ones. Malformed input is dropped
//! silently so that a formatting mistake never disturbs the caller.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Key-ordered field map attached to a single record.
pub type Fields = BTreeMap<String, Value>;

/// Convert an alternating key/value sequence into a [`Fields`] map.
pub fn encode_fields(items: &[Value]) -> Fields {
    items
        .chunks_exact(2)
        .filter_map(|pair| match &pair[0] {
            Value::String(key) => Some((key.clone(), pair[1].clone())),
            _ => None,
        })
        .collect()
}

/// Convert one key or value item for the field list.
///
/// An item that fails to serialize becomes `null`: as a key it drops the pair,
/// as a value it is recorded as `null`.
pub fn to_field_value<T: Serialize + ?Sized>(item: &T) -> Value {
    serde_json::to_value(item).unwrap_or(Value::Null)
}

/// Build an alternating key/value item array for the emit methods.
///
/// Keys and values can be any serializable expression; see
/// [`to_field_value`] for items that fail to serialize.
///
/// ```
/// use fieldlog::{encode_fields, fields};
///
/// let items = fields!["app", "example", "attempt", 3];
/// let map = encode_fields(&items);
/// assert_eq!(map["attempt"], 3);
/// ```
#[macro_export]
macro_rules! fields {
    () => {{
        let items: [$crate::serde_json::Value; 0] = [];
        items
    }};
    ($($item:expr),+ $(,)?) => {
        [$($crate::fields::to_field_value(&$item)),+]
    };
}
