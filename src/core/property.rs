//! Property trees produced by a container decoder.
//!
//! A property tree is a nested mapping of string keys to typed values.
//! Entries keep their insertion order, which matters for the "first image
//! wins" lookups in the locator.

use std::fmt;

/// Top-level properties of one image source.
pub type PropertyTree = PropertyDict;

/// A single value in a property tree.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    /// Raw byte buffer (pixel data, encoded payloads).
    Data(Vec<u8>),
    Array(Vec<PropertyValue>),
    Dict(PropertyDict),
}

impl PropertyValue {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::String(_) => "string",
            Self::Data(_) => "data",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value; reals with no fractional part also qualify.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(i) => Some(i),
            Self::Real(r) if r.fract() == 0.0 && r.is_finite() => Some(r as i64),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Self::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&PropertyDict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        Self::Integer(v as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Data(v)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(v: Vec<PropertyValue>) -> Self {
        Self::Array(v)
    }
}

impl From<PropertyDict> for PropertyValue {
    fn from(v: PropertyDict) -> Self {
        Self::Dict(v)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Real(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(a) => Self::Array(a.into_iter().map(Self::from).collect()),
            Value::Object(o) => Self::Dict(o.into_iter().collect()),
        }
    }
}

/// Ordered string-keyed mapping.
///
/// Entries live on the heap: a dictionary nests inside [`PropertyValue`],
/// which nests inside a dictionary.
#[derive(Clone, Default, PartialEq)]
pub struct PropertyDict {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyDict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing an existing entry in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        let value = value.into();

        for (k, v) in &mut self.entries {
            if k == &key {
                *v = value;
                return;
            }
        }
        self.entries.push((key, value));
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Get a nested dictionary by key.
    pub fn get_dict(&self, key: &str) -> Option<&PropertyDict> {
        self.get(key).and_then(PropertyValue::as_dict)
    }

    /// Get a list by key.
    pub fn get_array(&self, key: &str) -> Option<&[PropertyValue]> {
        self.get(key).and_then(PropertyValue::as_array)
    }

    /// Get a string by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a key and return its value.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Debug for PropertyDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyDict {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.set(k, v);
        }
        dict
    }
}

impl From<serde_json::Value> for PropertyDict {
    /// Objects become dictionaries; any other JSON value yields an empty one.
    fn from(value: serde_json::Value) -> Self {
        match PropertyValue::from(value) {
            PropertyValue::Dict(d) => d,
            _ => Self::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dict_basic() {
        let mut dict = PropertyDict::new();
        dict.set("Width", 640i64);
        dict.set("Name", "depth");

        assert_eq!(dict.get("Width"), Some(&PropertyValue::Integer(640)));
        assert_eq!(dict.get_str("Name"), Some("depth"));
        assert_eq!(dict.get("Height"), None);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_dict_update_keeps_order() {
        let mut dict = PropertyDict::new();
        dict.set("a", 1i64);
        dict.set("b", 2i64);
        dict.set("a", 3i64);

        let keys: Vec<_> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(dict.get("a").and_then(PropertyValue::as_i64), Some(3));
    }

    #[test]
    fn test_dict_remove() {
        let mut dict = PropertyDict::new().with("x", true);
        assert_eq!(dict.remove("x"), Some(PropertyValue::Bool(true)));
        assert!(dict.remove("x").is_none());
        assert!(dict.is_empty());
    }

    #[test]
    fn test_from_json() {
        let tree = PropertyDict::from(json!({
            "{FileContents}": {
                "Images": [{ "Width": 4032, "Ratio": 1.5 }]
            }
        }));

        let images = tree
            .get_dict("{FileContents}")
            .and_then(|fc| fc.get_array("Images"))
            .expect("images list");
        assert_eq!(images.len(), 1);

        let first = images[0].as_dict().expect("image dict");
        assert_eq!(first.get("Width").and_then(PropertyValue::as_i64), Some(4032));
        assert_eq!(first.get("Ratio"), Some(&PropertyValue::Real(1.5)));
    }

    #[test]
    fn test_nested_dicts() {
        let leaf = PropertyDict::new().with("Width", 2i64);
        let mid = PropertyDict::new().with("Description", leaf.clone());
        let root = PropertyDict::new()
            .with("Info", mid)
            .with("List", vec![PropertyValue::from(leaf.clone())]);

        let found = root
            .get_dict("Info")
            .and_then(|d| d.get_dict("Description"))
            .expect("nested dict");
        assert_eq!(found, &leaf);
        assert_eq!(root.get_array("List").map(<[PropertyValue]>::len), Some(1));
    }

    #[test]
    fn test_as_i64_accepts_whole_reals() {
        assert_eq!(PropertyValue::Real(8.0).as_i64(), Some(8));
        assert_eq!(PropertyValue::Real(8.5).as_i64(), None);
        assert_eq!(PropertyValue::from("8").as_i64(), None);
    }
}
