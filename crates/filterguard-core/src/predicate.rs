//! Predicate trees.
//!
//! A [`Predicate`] is the structured form of a query filter as it would be
//! sent to the backing document store. It has exactly three shapes:
//!
//! - a [`Document`]: an ordered mapping of field names to predicates
//!   (`{"tenantId": "t1", "ts": {"$gte": 10}}`)
//! - a sequence: an ordered list of predicates, used for combinators such
//!   as `$and`/`$or` and for array operands
//! - a [`Scalar`]: an opaque leaf value
//!
//! Predicates convert losslessly from `serde_json::Value` and implement
//! serde through that conversion, so a request payload can be decoded
//! straight into a tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

/// A leaf value in a predicate tree. Never inspected by enforcement.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value, kept in its original JSON representation.
    Number(Number),
    /// UTF-8 string.
    String(String),
}

/// An ordered mapping from field names to predicates.
///
/// Keys are unique; inserting an existing key replaces its value in place
/// and keeps the original position. `insert` scans for the key, so the
/// builder API suits hand-written filters; decoding from JSON does not go
/// through it.
///
/// Dropping a tree recurses once per nesting level, like the search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Predicate)>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Predicate>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Predicate>) -> Option<Predicate> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Check whether `key` is a direct field of this document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Get the value of a direct field.
    pub fn get(&self, key: &str) -> Option<&Predicate> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Predicate> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Predicate>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

/// A query filter predicate tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum Predicate {
    /// Field name to sub-predicate mapping.
    Document(Document),
    /// Ordered list of sub-predicates.
    Sequence(Vec<Predicate>),
    /// Opaque leaf value.
    Scalar(Scalar),
}

impl Predicate {
    /// Build a document predicate from key/value pairs.
    pub fn document<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Predicate>,
        I: IntoIterator<Item = (K, V)>,
    {
        Predicate::Document(fields.into_iter().collect())
    }

    /// Build a sequence predicate.
    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<Predicate>,
        I: IntoIterator<Item = V>,
    {
        Predicate::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// The null scalar.
    pub fn null() -> Self {
        Predicate::Scalar(Scalar::Null)
    }

    /// Try to get as a document.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Predicate::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Try to get as a sequence.
    pub fn as_sequence(&self) -> Option<&[Predicate]> {
        match self {
            Predicate::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this is a scalar leaf.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Predicate::Scalar(_))
    }
}

impl Default for Predicate {
    /// The empty document, i.e. an unfiltered query.
    fn default() -> Self {
        Predicate::Document(Document::new())
    }
}

impl From<Document> for Predicate {
    fn from(doc: Document) -> Self {
        Predicate::Document(doc)
    }
}

impl From<Vec<Predicate>> for Predicate {
    fn from(items: Vec<Predicate>) -> Self {
        Predicate::Sequence(items)
    }
}

impl From<Scalar> for Predicate {
    fn from(scalar: Scalar) -> Self {
        Predicate::Scalar(scalar)
    }
}

impl From<bool> for Predicate {
    fn from(b: bool) -> Self {
        Predicate::Scalar(Scalar::Bool(b))
    }
}

impl From<i32> for Predicate {
    fn from(i: i32) -> Self {
        Predicate::Scalar(Scalar::Number(i.into()))
    }
}

impl From<i64> for Predicate {
    fn from(i: i64) -> Self {
        Predicate::Scalar(Scalar::Number(i.into()))
    }
}

impl From<f64> for Predicate {
    /// Non-finite floats have no JSON representation and become null.
    fn from(f: f64) -> Self {
        Predicate::Scalar(Number::from_f64(f).map_or(Scalar::Null, Scalar::Number))
    }
}

impl From<&str> for Predicate {
    fn from(s: &str) -> Self {
        Predicate::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Predicate {
    fn from(s: String) -> Self {
        Predicate::Scalar(Scalar::String(s))
    }
}

impl From<JsonValue> for Predicate {
    fn from(value: JsonValue) -> Self {
        match value {
            // serde_json object keys are unique
            JsonValue::Object(map) => Predicate::Document(Document {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (k, Predicate::from(v)))
                    .collect(),
            }),
            JsonValue::Array(items) => {
                Predicate::Sequence(items.into_iter().map(Predicate::from).collect())
            }
            JsonValue::Null => Predicate::Scalar(Scalar::Null),
            JsonValue::Bool(b) => Predicate::Scalar(Scalar::Bool(b)),
            JsonValue::Number(n) => Predicate::Scalar(Scalar::Number(n)),
            JsonValue::String(s) => Predicate::Scalar(Scalar::String(s)),
        }
    }
}

impl From<Predicate> for JsonValue {
    fn from(predicate: Predicate) -> Self {
        match predicate {
            Predicate::Document(doc) => JsonValue::Object(
                doc.entries
                    .into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect::<Map<String, JsonValue>>(),
            ),
            Predicate::Sequence(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            Predicate::Scalar(Scalar::Null) => JsonValue::Null,
            Predicate::Scalar(Scalar::Bool(b)) => JsonValue::Bool(b),
            Predicate::Scalar(Scalar::Number(n)) => JsonValue::Number(n),
            Predicate::Scalar(Scalar::String(s)) => JsonValue::String(s),
        }
    }
}
