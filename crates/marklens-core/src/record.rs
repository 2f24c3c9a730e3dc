//! Loosely-typed bookmark records.
//!
//! A record is an open JSON object. The recognised fields (`url`, `title`,
//! `description`, `folder_name`, `date_added`, `url_content`) are all
//! optional and read as the empty string when absent; unknown keys pass
//! through to the output untouched. Annotators add their verdict fields by
//! key insertion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookmark-like record: an open JSON object with optional recognised fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Read a field as a string; absent or non-string values read as "".
    pub fn field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Raw field access, for passthrough of values of any type.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn url(&self) -> &str {
        self.field("url")
    }

    pub fn title(&self) -> &str {
        self.field("title")
    }

    pub fn description(&self) -> &str {
        self.field("description")
    }

    pub fn folder_name(&self) -> &str {
        self.field("folder_name")
    }

    pub fn date_added(&self) -> &str {
        self.field("date_added")
    }

    pub fn url_content(&self) -> &str {
        self.field("url_content")
    }

    /// Attach an annotation field, overwriting any previous value.
    pub fn annotate(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One entry of an input batch: either a bare URL string or a record object.
///
/// Endpoints that need full records reject string items as malformed input;
/// the link checker accepts both shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputItem {
    Url(String),
    Record(Record),
}

impl InputItem {
    /// The raw URL carried by this item, however it was shaped.
    pub fn raw_url(&self) -> &str {
        match self {
            Self::Url(s) => s,
            Self::Record(r) => r.url(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            Self::Url(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_fields_read_as_empty() {
        let r = record(json!({ "title": "Rust book" }));
        assert_eq!(r.title(), "Rust book");
        assert_eq!(r.description(), "");
        assert_eq!(r.folder_name(), "");
    }

    #[test]
    fn non_string_fields_read_as_empty() {
        let r = record(json!({ "title": 42 }));
        assert_eq!(r.title(), "");
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let mut r = record(json!({ "title": "x", "custom_tag": ["a", "b"] }));
        r.annotate("verdict", "ok");

        let out = serde_json::to_value(&r).unwrap();
        assert_eq!(out["custom_tag"], json!(["a", "b"]));
        assert_eq!(out["verdict"], json!("ok"));
        assert_eq!(out["title"], json!("x"));
    }

    #[test]
    fn annotate_overwrites() {
        let mut r = Record::new();
        r.annotate("reason", "first");
        r.annotate("reason", "second");
        assert_eq!(r.field("reason"), "second");
    }

    #[test]
    fn input_item_accepts_both_shapes() {
        let url: InputItem = serde_json::from_value(json!("https://x.com")).unwrap();
        assert_eq!(url.raw_url(), "https://x.com");
        assert!(url.as_record().is_none());

        let rec: InputItem =
            serde_json::from_value(json!({ "url": "https://y.com", "title": "Y" })).unwrap();
        assert_eq!(rec.raw_url(), "https://y.com");
        assert_eq!(rec.as_record().unwrap().title(), "Y");
    }

    #[test]
    fn input_item_rejects_other_shapes() {
        assert!(serde_json::from_value::<InputItem>(json!(42)).is_err());
        assert!(serde_json::from_value::<InputItem>(json!([1, 2])).is_err());
    }
}
