//! Message-type descriptors.
//!
//! A read-only reflection of a protobuf schema: messages are ordered lists
//! of fields, each field has a [`WireKind`], a repetition flag, an optional
//! oneof group and, for `message`/`enum` fields, the full name of the nested
//! type. Nested names are resolved through a [`DescriptorPool`].
//!
//! Descriptors come from a YAML/JSON document ([`DescriptorPool::from_yaml_str`]),
//! from an already-compiled `FileDescriptorSet`
//! ([`DescriptorPool::from_file_descriptor_set`]), or are built in code.

mod file_set;
mod pool;

pub use pool::DescriptorPool;

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Wire Kinds
// ============================================================================

/// The scalar or structural category of a field.
///
/// Serialized as the lowercase protobuf type keyword (`int32`, `bytes`,
/// `message`, ...). Keywords outside the known set deserialize into
/// [`WireKind::Unrecognized`] rather than failing, so descriptors produced by
/// newer tooling still load; synthesis treats them as a numeric kind it does
/// not know and falls back to a 64-bit float.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WireKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Enum,
    Message,
    /// A kind keyword this crate does not know.
    Unrecognized(String),
}

impl WireKind {
    /// Returns the protobuf keyword for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Enum => "enum",
            Self::Message => "message",
            Self::Unrecognized(keyword) => keyword,
        }
    }
}

impl From<&str> for WireKind {
    fn from(keyword: &str) -> Self {
        match keyword {
            "double" => Self::Double,
            "float" => Self::Float,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "sint32" => Self::Sint32,
            "sint64" => Self::Sint64,
            "fixed32" => Self::Fixed32,
            "fixed64" => Self::Fixed64,
            "sfixed32" => Self::Sfixed32,
            "sfixed64" => Self::Sfixed64,
            "bool" => Self::Bool,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "enum" => Self::Enum,
            "message" | "group" => Self::Message,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for WireKind {
    fn from(keyword: String) -> Self {
        Self::from(keyword.as_str())
    }
}

impl From<WireKind> for String {
    fn from(kind: WireKind) -> Self {
        match kind {
            WireKind::Unrecognized(keyword) => keyword,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Fields and Messages
// ============================================================================

/// Schema of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Field name, unique within its message
    pub name: String,

    /// Wire kind
    pub kind: WireKind,

    /// Whether the field is `repeated`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,

    /// Oneof group this field belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneof: Option<String>,

    /// Full name of the nested message or enum (for `message`/`enum` kinds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl FieldDescriptor {
    /// Creates a singular field outside any oneof group.
    pub fn new(name: impl Into<String>, kind: WireKind) -> Self {
        Self {
            name: name.into(),
            kind,
            repeated: false,
            oneof: None,
            type_name: None,
        }
    }

    /// Creates a field of kind `message` referring to `type_name`.
    pub fn message(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, WireKind::Message).with_type_name(type_name)
    }

    /// Creates a field of kind `enum` referring to `type_name`.
    pub fn enumeration(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, WireKind::Enum).with_type_name(type_name)
    }

    /// Marks the field as repeated.
    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Places the field in a oneof group.
    #[must_use]
    pub fn in_oneof(mut self, group: impl Into<String>) -> Self {
        self.oneof = Some(group.into());
        self
    }

    /// Sets the nested type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Schema of one message type: its full name and fields in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDescriptor {
    /// Fully qualified name, without a leading dot (e.g. `demo.Color`)
    #[serde(rename = "name")]
    pub full_name: String,

    /// Fields in declared order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Creates a message with no fields.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that are not part of any oneof group, in declared order.
    pub fn plain_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.oneof.is_none())
    }
}

// ============================================================================
// Enums
// ============================================================================

/// One named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValue {
    /// Value name
    pub name: String,
    /// Declared number
    pub number: i32,
}

/// Schema of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDescriptor {
    /// Fully qualified name, without a leading dot
    #[serde(rename = "name")]
    pub full_name: String,

    /// Declared values
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl EnumDescriptor {
    /// Creates an enum whose values are numbered `0..n` in the given order.
    pub fn from_names<I, S>(full_name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = names
            .into_iter()
            .zip(0..)
            .map(|(name, number)| EnumValue {
                name: name.into(),
                number,
            })
            .collect();
        Self {
            full_name: full_name.into(),
            values,
        }
    }

    /// Number of declared values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the enum declares no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the ordinal count if the declared numbers are exactly `0..len`.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the enum is empty or its
    /// numbers are not a contiguous run starting at zero.
    pub fn contiguous_len(&self) -> Result<usize, String> {
        if self.values.is_empty() {
            return Err("enum declares no values".to_string());
        }

        let mut numbers: Vec<i32> = self.values.iter().map(|v| v.number).collect();
        numbers.sort_unstable();
        let contiguous = numbers
            .iter()
            .zip(0_i64..)
            .all(|(&number, expected)| i64::from(number) == expected);

        if contiguous {
            Ok(numbers.len())
        } else {
            Err(format!(
                "enum values {numbers:?} are not contiguous from 0 to {}",
                numbers.len() - 1
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_kind_keywords_round_trip() {
        for keyword in [
            "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64",
            "fixed32", "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes", "enum",
            "message",
        ] {
            let kind = WireKind::from(keyword);
            assert!(
                !matches!(kind, WireKind::Unrecognized(_)),
                "{keyword} should be recognized"
            );
            assert_eq!(kind.as_str(), keyword);
        }
    }

    #[test]
    fn group_is_treated_as_message() {
        assert_eq!(WireKind::from("group"), WireKind::Message);
    }

    #[test]
    fn unknown_keyword_is_preserved() {
        let kind = WireKind::from("int128");
        assert_eq!(kind, WireKind::Unrecognized("int128".to_string()));
        assert_eq!(kind.to_string(), "int128");
    }

    #[test]
    fn field_deserializes_from_yaml() {
        let field: FieldDescriptor =
            serde_yaml::from_str("name: named\nkind: enum\noneof: spec\ntype_name: demo.ColorName\n")
                .unwrap();
        assert_eq!(
            field,
            FieldDescriptor::enumeration("named", "demo.ColorName").in_oneof("spec")
        );
    }

    #[test]
    fn field_serialization_skips_defaults() {
        let json = serde_json::to_value(FieldDescriptor::new("id", WireKind::Uint64)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "id", "kind": "uint64"}));
    }

    #[test]
    fn plain_fields_exclude_oneof_members() {
        let message = MessageDescriptor::new("demo.M")
            .with_field(FieldDescriptor::new("a", WireKind::Int32).in_oneof("g"))
            .with_field(FieldDescriptor::new("b", WireKind::Int32))
            .with_field(FieldDescriptor::new("c", WireKind::Bool));
        let names: Vec<&str> = message.plain_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
        assert!(message.field("a").is_some());
        assert!(message.field("z").is_none());
    }

    #[test]
    fn from_names_numbers_from_zero() {
        let e = EnumDescriptor::from_names("demo.E", ["A", "B", "C"]);
        assert_eq!(e.len(), 3);
        assert_eq!(e.values[2].number, 2);
        assert_eq!(e.contiguous_len(), Ok(3));
    }

    #[test]
    fn contiguous_len_accepts_any_declaration_order() {
        let e = EnumDescriptor {
            full_name: "demo.E".to_string(),
            values: vec![
                EnumValue { name: "B".to_string(), number: 1 },
                EnumValue { name: "A".to_string(), number: 0 },
            ],
        };
        assert_eq!(e.contiguous_len(), Ok(2));
    }

    #[test]
    fn contiguous_len_rejects_gaps_and_empty() {
        let gappy = EnumDescriptor {
            full_name: "demo.E".to_string(),
            values: vec![
                EnumValue { name: "A".to_string(), number: 0 },
                EnumValue { name: "B".to_string(), number: 5 },
            ],
        };
        assert!(gappy.contiguous_len().is_err());

        let empty = EnumDescriptor::from_names("demo.Empty", Vec::<String>::new());
        assert!(empty.is_empty());
        assert!(empty.contiguous_len().is_err());
    }

    #[test]
    fn contiguous_len_rejects_negative_start() {
        let e = EnumDescriptor {
            full_name: "demo.E".to_string(),
            values: vec![
                EnumValue { name: "NEG".to_string(), number: -1 },
                EnumValue { name: "ZERO".to_string(), number: 0 },
            ],
        };
        assert!(e.contiguous_len().is_err());
    }
}
