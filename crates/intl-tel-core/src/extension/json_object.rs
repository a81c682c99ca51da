use crate::{JsonValue, Map};
use std::str::ParseBoolError;

/// Extension trait for [`Map`].
pub trait JsonObjectExt {
    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the object value corresponding to the key.
    fn get_object(&self, key: &str) -> Option<&Map>;

    /// Extracts the value corresponding to the key and parses it as `bool`.
    fn parse_bool(&self, key: &str) -> Option<Result<bool, ParseBoolError>>;

    /// Extracts the string corresponding to the key.
    /// If the string is empty, it also returns `None`.
    fn parse_string(&self, key: &str) -> Option<&str>;

    /// Extracts the value corresponding to the key and parses it as `Vec<&str>`.
    /// A string value is split by commas, and the surrounding whitespaces of each
    /// element are trimmed. If the vec is empty, it also returns `None`.
    fn parse_str_array(&self, key: &str) -> Option<Vec<&str>>;

    /// Inserts or updates a pair into the map.
    /// If the map did have this key present, the value is updated and the old value is returned,
    /// otherwise `None` is returned.
    fn upsert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue>;

    /// Creates a new instance with the entry.
    fn from_entry(key: impl Into<String>, value: impl Into<JsonValue>) -> Self;
}

impl JsonObjectExt for Map {
    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_object(&self, key: &str) -> Option<&Map> {
        self.get(key).and_then(|v| v.as_object())
    }

    fn parse_bool(&self, key: &str) -> Option<Result<bool, ParseBoolError>> {
        let value = self.get(key);
        value
            .and_then(|v| v.as_bool())
            .map(Ok)
            .or_else(|| value.and_then(|v| v.as_str()).map(|s| s.parse()))
    }

    #[inline]
    fn parse_string(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|s| !s.is_empty())
    }

    fn parse_str_array(&self, key: &str) -> Option<Vec<&str>> {
        self.get(key)
            .and_then(|v| match v {
                JsonValue::String(s) => Some(
                    s.split(',')
                        .map(|s| s.trim())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>(),
                ),
                JsonValue::Array(v) => Some(v.iter().filter_map(|v| v.as_str()).collect()),
                _ => None,
            })
            .filter(|vec| !vec.is_empty())
    }

    #[inline]
    fn upsert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.insert(key.into(), value.into())
    }

    #[inline]
    fn from_entry(key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let mut map = Map::new();
        map.insert(key.into(), value.into());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::JsonObjectExt;
    use crate::{Map, json};

    #[test]
    fn it_parses_str_arrays() {
        let mut map = Map::new();
        map.upsert("exclude-countries", "us,ca");
        map.upsert("only-countries", " gb , , fr ");
        map.upsert("preferred-countries", "");
        map.upsert("initial-country", json!(["ec", "es"]));
        assert_eq!(map.parse_str_array("exclude-countries"), Some(vec!["us", "ca"]));
        assert_eq!(map.parse_str_array("only-countries"), Some(vec!["gb", "fr"]));
        assert_eq!(map.parse_str_array("preferred-countries"), None);
        assert_eq!(map.parse_str_array("initial-country"), Some(vec!["ec", "es"]));
        assert_eq!(map.parse_str_array("missing"), None);
    }

    #[test]
    fn it_parses_bools_and_strings() {
        let mut map = Map::from_entry("show-flags", true);
        map.upsert("format-on-display", "false");
        map.upsert("custom_id", "");
        assert_eq!(map.parse_bool("show-flags"), Some(Ok(true)));
        assert_eq!(map.parse_bool("format-on-display"), Some(Ok(false)));
        assert_eq!(map.parse_bool("missing"), None);
        assert_eq!(map.parse_string("custom_id"), None);
        assert_eq!(map.get_str("custom_id"), Some(""));
    }
}
