//! Synthesized output values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One synthesized field value.
///
/// Serializes untagged, so a message renders as a plain JSON object. Byte
/// blobs render as standard base64 text and non-finite floats as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SynthesizedValue {
    Double(f64),
    Float(f32),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    String(String),
    Bytes(#[serde(serialize_with = "serialize_base64")] Vec<u8>),
    /// Enum ordinal
    Enum(i32),
    Message(SynthesizedMessage),
    /// Elements of a repeated field
    Repeated(Vec<SynthesizedValue>),
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

impl SynthesizedValue {
    /// Short name of the variant, for diagnostics and shape comparisons.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Double(_) => "double",
            Self::Float(_) => "float",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::Repeated(_) => "repeated",
        }
    }

    /// Returns the nested message, if this is one.
    #[must_use]
    pub const fn as_message(&self) -> Option<&SynthesizedMessage> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the repeated elements, if this is a repeated value.
    #[must_use]
    pub fn as_repeated(&self) -> Option<&[Self]> {
        match self {
            Self::Repeated(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the byte blob, if this is one.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the enum ordinal, if this is one.
    #[must_use]
    pub const fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(ordinal) => Some(*ordinal),
            _ => None,
        }
    }
}

/// A synthesized message: field name to value, in insertion order.
///
/// Oneof selections come first (one per group, groups in order of first
/// declaration), followed by every other field in declared order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SynthesizedMessage {
    fields: IndexMap<String, SynthesizedValue>,
}

impl SynthesizedMessage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value under the same name.
    pub(crate) fn insert(
        &mut self,
        name: impl Into<String>,
        value: SynthesizedValue,
    ) -> Option<SynthesizedValue> {
        self.fields.insert(name.into(), value)
    }

    /// Looks up a field value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SynthesizedValue> {
        self.fields.get(name)
    }

    /// Whether a field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names, in output order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs, in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SynthesizedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Renders the message as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        // String-keyed maps of these values cannot fail to serialize.
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Consumes the message, returning the underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, SynthesizedValue> {
        self.fields
    }
}

impl<'a> IntoIterator for &'a SynthesizedMessage {
    type Item = (&'a String, &'a SynthesizedValue);
    type IntoIter = indexmap::map::Iter<'a, String, SynthesizedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SynthesizedMessage {
        let mut inner = SynthesizedMessage::new();
        inner.insert("level", SynthesizedValue::Int64(-7));

        let mut message = SynthesizedMessage::new();
        message.insert("blob", SynthesizedValue::Bytes(b"hi".to_vec()));
        message.insert(
            "tags",
            SynthesizedValue::Repeated(vec![
                SynthesizedValue::Int32(1),
                SynthesizedValue::Int32(2),
            ]),
        );
        message.insert("shade", SynthesizedValue::Message(inner));
        message.insert("named", SynthesizedValue::Enum(3));
        message.insert("ratio", SynthesizedValue::Double(f64::NAN));
        message
    }

    #[test]
    fn renders_json() {
        assert_eq!(
            sample().to_json(),
            json!({
                "blob": "aGk=",
                "tags": [1, 2],
                "shade": {"level": -7},
                "named": 3,
                "ratio": null,
            })
        );
    }

    #[test]
    fn preserves_insertion_order() {
        let sample = sample();
        let names: Vec<&str> = sample.field_names().collect();
        assert_eq!(names, ["blob", "tags", "shade", "named", "ratio"]);
    }

    #[test]
    fn accessors() {
        let message = sample();
        assert_eq!(message.len(), 5);
        assert!(message.contains("shade"));
        assert!(!message.contains("missing"));
        assert_eq!(message.get("blob").and_then(SynthesizedValue::as_bytes), Some(&b"hi"[..]));
        assert_eq!(message.get("named").and_then(SynthesizedValue::as_enum), Some(3));
        assert_eq!(
            message
                .get("tags")
                .and_then(SynthesizedValue::as_repeated)
                .map(<[SynthesizedValue]>::len),
            Some(2)
        );
        assert!(
            message
                .get("shade")
                .and_then(SynthesizedValue::as_message)
                .is_some_and(|m| m.contains("level"))
        );
        assert_eq!(message.get("ratio").map(SynthesizedValue::kind_name), Some("double"));
    }

    #[test]
    fn insert_reports_replacement() {
        let mut message = SynthesizedMessage::new();
        assert!(message.insert("a", SynthesizedValue::Bool(true)).is_none());
        assert_eq!(
            message.insert("a", SynthesizedValue::Bool(false)),
            Some(SynthesizedValue::Bool(true))
        );
    }

    #[test]
    fn iterates_pairs() {
        let message = sample();
        let kinds: Vec<&str> = message.iter().map(|(_, v)| v.kind_name()).collect();
        assert_eq!(kinds, ["bytes", "repeated", "message", "enum", "double"]);
        assert_eq!((&message).into_iter().count(), 5);
        assert_eq!(message.into_inner().len(), 5);
    }
}
