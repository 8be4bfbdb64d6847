//! Query/body assembly that skips unset values.
//!
//! Every query string and JSON body is built from ordered `(key, Option<Value>)` pairs; `None`
//! never reaches the wire, neither as a missing value nor as `null`.

use serde::Serialize;
use serde_json::Value;

pub type JsonMap = serde_json::Map<String, Value>;

/// Keep only the present values, preserving insertion order.
pub fn compact<I, K>(pairs: I) -> JsonMap
where
    I: IntoIterator<Item = (K, Option<Value>)>,
    K: Into<String>,
{
    pairs
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.into(), v)))
        .collect()
}

/// Serialize an optional argument; `None` (and values that serialize to `null`) stay absent.
pub fn opt<T: Serialize>(value: Option<T>) -> Option<Value> {
    value
        .and_then(|v| serde_json::to_value(v).ok())
        .filter(|v| !v.is_null())
}

/// Build a [`JsonMap`] from `"key" => Option<_>` pairs, omitting `None`.
///
/// ```
/// use housecall_api::params;
///
/// let name = Some("Jane");
/// let email: Option<String> = None;
/// let map = params! { "first_name" => name, "email" => email };
/// assert_eq!(map.len(), 1);
/// ```
#[macro_export]
macro_rules! params {
    ($($key:literal => $value:expr),+ $(,)?) => {
        $crate::params::compact([$(($key, $crate::params::opt($value))),+])
    };
}

/// Clamp a page size to `1..=max`.
#[must_use]
pub fn clamp_page_size(value: Option<u32>, max: u32) -> Option<u32> {
    value.map(|v| v.clamp(1, max))
}

/// Render a map as query pairs: booleans lowercase, arrays comma-joined.
#[must_use]
pub fn to_query_pairs(map: &JsonMap) -> Vec<(String, String)> {
    map.iter()
        .map(|(k, v)| (k.clone(), value_to_string(v)))
        .collect()
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_values_are_omitted() {
        let none: Option<String> = None;
        let map = params! {
            "first_name" => Some("Jane"),
            "last_name" => Some("Doe"),
            "email" => none,
            "is_commercial" => None::<bool>,
        };
        assert_eq!(
            Value::Object(map),
            json!({"first_name": "Jane", "last_name": "Doe"})
        );
    }

    #[test]
    fn false_and_zero_are_kept() {
        let map = params! { "active" => Some(false), "page" => Some(0) };
        assert_eq!(Value::Object(map), json!({"active": false, "page": 0}));
    }

    #[test]
    fn order_is_preserved() {
        let map = params! { "b" => Some(1), "a" => Some(2) };
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(clamp_page_size(Some(500), 100), Some(100));
        assert_eq!(clamp_page_size(Some(0), 100), Some(1));
        assert_eq!(clamp_page_size(Some(25), 100), Some(25));
        assert_eq!(clamp_page_size(None, 100), None);
    }

    #[test]
    fn query_values_are_stringified() {
        let map = params! {
            "sent" => Some(true),
            "page" => Some(2),
            "id" => Some(vec!["a", "b", "c"]),
            "q" => Some("x y"),
        };
        let pairs = to_query_pairs(&map);
        assert_eq!(
            pairs,
            vec![
                ("sent".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
                ("id".to_string(), "a,b,c".to_string()),
                ("q".to_string(), "x y".to_string()),
            ]
        );
    }
}
