//! Document encoding
//!
//! Records render themselves into a `serde_json::Value` through
//! [`DocumentBuilder`], a chained object builder that keeps members in the
//! order they are added.

use super::token::TokenStream;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A record with a document form
pub trait ToDocument {
    /// Render the record as a JSON object
    fn to_document(&self) -> Value;
}

/// A record that can be parsed from a token stream
///
/// The cursor must be on the record's `StartObject` and is left on its
/// `EndObject`.
pub trait FromDocument: Sized {
    /// Parse the record, running its validating constructor
    fn parse(stream: &mut TokenStream) -> Result<Self>;
}

/// Chained builder for a JSON object
#[derive(Debug, Default, Clone)]
pub struct DocumentBuilder {
    members: Map<String, Value>,
}

impl DocumentBuilder {
    /// Start an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar or pre-built member
    pub fn field(mut self, tag: &str, value: impl Into<Value>) -> Self {
        self.members.insert(tag.to_string(), value.into());
        self
    }

    /// Add a member only when a value is present
    pub fn field_if_some<V: Into<Value>>(self, tag: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.field(tag, v),
            None => self,
        }
    }

    /// Add a nested record
    pub fn object<T: ToDocument + ?Sized>(self, tag: &str, record: &T) -> Self {
        let value = record.to_document();
        self.field(tag, value)
    }

    /// Add a nested record only when present
    pub fn object_if_some<T: ToDocument>(self, tag: &str, record: Option<&T>) -> Self {
        match record {
            Some(r) => self.object(tag, r),
            None => self,
        }
    }

    /// Add an array of nested records
    pub fn object_list<T: ToDocument>(self, tag: &str, records: &[T]) -> Self {
        let values: Vec<Value> = records.iter().map(ToDocument::to_document).collect();
        self.field(tag, values)
    }

    /// Add an array of strings
    pub fn string_list(self, tag: &str, values: &[String]) -> Self {
        self.field(tag, values.to_vec())
    }

    /// Add an object of string pairs
    pub fn string_map(self, tag: &str, map: &BTreeMap<String, String>) -> Self {
        let members: Map<String, Value> = map
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self.field(tag, Value::Object(members))
    }

    /// Add a timestamp as epoch milliseconds
    pub fn timestamp_millis(self, tag: &str, value: &DateTime<Utc>) -> Self {
        self.field(tag, value.timestamp_millis())
    }

    /// Add a timestamp as epoch milliseconds only when present
    pub fn timestamp_millis_if_some(self, tag: &str, value: Option<&DateTime<Utc>>) -> Self {
        match value {
            Some(ts) => self.timestamp_millis(tag, ts),
            None => self,
        }
    }

    /// Finish the object
    pub fn build(self) -> Value {
        Value::Object(self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Recipient(&'static str);

    impl ToDocument for Recipient {
        fn to_document(&self) -> Value {
            DocumentBuilder::new().field("recipient", self.0).build()
        }
    }

    #[test]
    fn test_builder_skips_absent_optionals() {
        let doc = DocumentBuilder::new()
            .field("name", "n")
            .field_if_some::<String>("description", None)
            .object_if_some::<Recipient>("owner", None)
            .build();
        assert_eq!(doc, json!({"name": "n"}));
    }

    #[test]
    fn test_builder_nested_and_lists() {
        let doc = DocumentBuilder::new()
            .object_list("recipient_list", &[Recipient("a@b.com"), Recipient("c@d.com")])
            .string_list("ids", &["x".to_string()])
            .build();
        assert_eq!(
            doc,
            json!({
                "recipient_list": [{"recipient": "a@b.com"}, {"recipient": "c@d.com"}],
                "ids": ["x"]
            })
        );
    }

    #[test]
    fn test_builder_preserves_insertion_order() {
        let doc = DocumentBuilder::new()
            .field("z", 1)
            .field("a", 2)
            .build();
        assert_eq!(doc.to_string(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_timestamp_as_millis() {
        let ts = DateTime::<Utc>::from_timestamp_millis(1_234).unwrap();
        let doc = DocumentBuilder::new().timestamp_millis("t", &ts).build();
        assert_eq!(doc, json!({"t": 1234}));
    }
}
