//! Book model and seed data

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Book record as stored and as exchanged over the API.
///
/// Every field defaults to its zero value when absent. Request bodies go
/// through [`Book::from_request_body`], which applies the lenient key rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Book {
    /// Externally supplied identifier, not checked for uniqueness
    pub id: String,
    pub title: String,
    pub author: String,
    /// Copies available for checkout
    pub quantity: i64,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Decode a book from a request body.
    ///
    /// The body must be a JSON object or `null`. Keys match case-insensitively,
    /// `null` values leave the field at its zero value, and when a key appears
    /// more than once the last occurrence wins.
    pub fn from_request_body(body: &[u8]) -> serde_json::Result<Self> {
        let RequestFields(fields) = serde_json::from_slice(body)?;
        Self::deserialize(Value::Object(fields))
    }
}

/// Object members of a request body, keys lowercased, nulls dropped
struct RequestFields(Map<String, Value>);

impl<'de> Deserialize<'de> for RequestFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RequestFieldsVisitor)
    }
}

struct RequestFieldsVisitor;

impl<'de> Visitor<'de> for RequestFieldsVisitor {
    type Value = RequestFields;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a book object")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(RequestFields(Map::new()))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = Map::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            if !value.is_null() {
                fields.insert(key.to_lowercase(), value);
            }
        }
        Ok(RequestFields(fields))
    }
}

/// Records present at startup
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new("1", "A1", "a1", 1),
        Book::new("2", "A2", "a2", 2),
        Book::new("3", "A3", "a3", 3),
        Book::new("4", "A4", "a4", 4),
    ]
}
