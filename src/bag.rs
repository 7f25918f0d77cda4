//! Typed, absence-tolerant access into property bags.
//!
//! External payloads are deeply nested and frequently partial. [`Prop`] wraps
//! an optional JSON node so that lookups compose without early returns:
//! a missing key, a `null`, or a node of the wrong JSON type all collapse to
//! "absent", and the terminal accessors decide what absent means.
//!
//! ```
//! use rostersync::bag::Prop;
//! use serde_json::json;
//!
//! let row = json!({"properties": {"Name": {"title": [{"plain_text": "Ada"}]}}});
//! let name = Prop::of(&row).get("properties").get("Name").get("title").first();
//! assert_eq!(name.get("plain_text").text(), "Ada");
//! assert_eq!(Prop::of(&row).get("nope").get("deeper").text(), "");
//! ```

use serde_json::{Map, Value};

/// A possibly-absent node in a JSON document.
#[derive(Debug, Clone, Copy)]
pub struct Prop<'a>(Option<&'a Value>);

impl<'a> Prop<'a> {
    /// Wraps a present node. `null` is treated as absent.
    pub fn of(value: &'a Value) -> Self {
        Prop(Some(value).filter(|v| !v.is_null()))
    }

    pub fn absent() -> Self {
        Prop(None)
    }

    /// Object member lookup.
    pub fn get(self, key: &str) -> Prop<'a> {
        Prop(self.0.and_then(|v| v.get(key)).filter(|v| !v.is_null()))
    }

    /// Array element lookup.
    pub fn at(self, index: usize) -> Prop<'a> {
        Prop(self.0.and_then(|v| v.get(index)).filter(|v| !v.is_null()))
    }

    pub fn first(self) -> Prop<'a> {
        self.at(0)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.0
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    pub fn as_object(&self) -> Option<&'a Map<String, Value>> {
        self.0.and_then(Value::as_object)
    }

    /// Array contents; empty when absent or not an array.
    pub fn as_slice(&self) -> &'a [Value] {
        self.0
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates array elements as `Prop`s.
    pub fn items(self) -> impl Iterator<Item = Prop<'a>> {
        self.as_slice().iter().map(Prop::of)
    }

    /// String content, or `""` when absent.
    pub fn text(&self) -> String {
        self.as_str().unwrap_or_default().to_string()
    }
}

impl<'a> From<&'a Value> for Prop<'a> {
    fn from(value: &'a Value) -> Self {
        Prop::of(value)
    }
}

/// Strips hyphen separators from an external identifier.
///
/// The external API returns identifiers in both dashed UUID form and compact
/// form depending on the endpoint.
pub fn normalize_id(id: &str) -> String {
    id.chars().filter(|c| *c != '-').collect()
}
