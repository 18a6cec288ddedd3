//! Record attribute access for filtering.
//!
//! The engine filters arbitrary in-memory collections; it only needs to read
//! attributes by key and enumerate the string-valued ones for free-text
//! search. Rows fetched from the table gateway are `serde_json` objects, so
//! an implementation for those is provided here.

use serde_json::Value;

/// A record attribute as seen by the filter engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attr<'a> {
    Text(&'a str),
    Number(f64),
    Flag(bool),
}

/// Anything the filter engine can read attributes from.
pub trait Record {
    /// The named attribute, if present and scalar-valued.
    fn attribute(&self, key: &str) -> Option<Attr<'_>>;

    /// All string-valued attributes, searched by the free-text query.
    fn search_text(&self) -> Vec<&str>;
}

impl Record for Value {
    fn attribute(&self, key: &str) -> Option<Attr<'_>> {
        json_attr(self.get(key)?)
    }

    fn search_text(&self) -> Vec<&str> {
        match self.as_object() {
            Some(map) => map.values().filter_map(Value::as_str).collect(),
            None => Vec::new(),
        }
    }
}

impl Record for serde_json::Map<String, Value> {
    fn attribute(&self, key: &str) -> Option<Attr<'_>> {
        json_attr(self.get(key)?)
    }

    fn search_text(&self) -> Vec<&str> {
        self.values().filter_map(Value::as_str).collect()
    }
}

fn json_attr(value: &Value) -> Option<Attr<'_>> {
    match value {
        Value::String(text) => Some(Attr::Text(text)),
        Value::Number(number) => number.as_f64().map(Attr::Number),
        Value::Bool(flag) => Some(Attr::Flag(*flag)),
        _ => None,
    }
}
