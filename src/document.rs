use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type Mapping = BTreeMap<String, Document>;

/// A generic document tree: the only thing the YAML/JSON codecs ever see.
///
/// Mappings are kept sorted by key. Sequences keep their order, which is what
/// carries the physical order of a beamline. Scalar mapping keys (`1:`,
/// `true:`) are read as their string form, since names are always strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Document>),
    Mapping(Mapping),
}

impl Document {
    /// Builds a mapping with a single `key: value` entry.
    #[must_use]
    pub fn single(key: impl Into<String>, value: Document) -> Self {
        let mut map = Mapping::new();
        map.insert(key.into(), value);
        Document::Mapping(map)
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Document::Mapping(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Document::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    /// A short human description used in error messages, e.g. `a string "drift1"`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Document::Null => "null".to_string(),
            Document::Boolean(b) => format!("a boolean {b}"),
            Document::Number(n) => format!("a number {n}"),
            Document::String(s) => format!("a string {s:?}"),
            Document::Sequence(seq) => format!("a sequence of {} entries", seq.len()),
            Document::Mapping(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                format!("a mapping with keys [{}]", keys.join(", "))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, boolean, number, string, sequence or mapping")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Document, D::Error> {
        Document::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Document, E> {
        Ok(Document::Boolean(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Document, E> {
        Ok(Document::Number(n as f64))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Document, E> {
        Ok(Document::Number(n as f64))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Document, E> {
        Ok(Document::Number(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Document, E> {
        Ok(Document::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Document, E> {
        Ok(Document::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Document::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut fields = Mapping::new();
        while let Some(MappingKey(key)) = map.next_key()? {
            fields.insert(key, map.next_value()?);
        }
        Ok(Document::Mapping(fields))
    }
}

/// A mapping key: any scalar except null, kept as text.
struct MappingKey(String);

impl<'de> Deserialize<'de> for MappingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MappingKeyVisitor).map(MappingKey)
    }
}

struct MappingKeyVisitor;

impl Visitor<'_> for MappingKeyVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean mapping key")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<String, E> {
        Ok(b.to_string())
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<String, E> {
        Ok(n.to_string())
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<String, E> {
        Ok(n.to_string())
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<String, E> {
        Ok(n.to_string())
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<String, E> {
        Ok(s.to_string())
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<String, E> {
        Ok(s)
    }
}

impl From<f64> for Document {
    fn from(n: f64) -> Self {
        Document::Number(n)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<Mapping> for Document {
    fn from(map: Mapping) -> Self {
        Document::Mapping(map)
    }
}

impl From<Vec<Document>> for Document {
    fn from(seq: Vec<Document>) -> Self {
        Document::Sequence(seq)
    }
}
