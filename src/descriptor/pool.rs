//! Registry of message and enum descriptors keyed by full name.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;

use crate::error::DescriptorError;

use super::{EnumDescriptor, MessageDescriptor};

/// Owns every descriptor of a schema and resolves nested type names.
///
/// Messages and enums share one namespace. Lookups accept names with or
/// without the leading dot protoc puts on fully qualified references, so
/// `.demo.Color` and `demo.Color` resolve to the same type.
///
/// Nested references are not checked when types are added: a schema may be
/// assembled in any order, and dangling references surface as
/// [`SynthesisError::MalformedDescriptor`](crate::error::SynthesisError::MalformedDescriptor)
/// only if synthesis reaches them.
#[derive(Debug, Clone, Default)]
pub struct DescriptorPool {
    messages: IndexMap<String, MessageDescriptor>,
    enums: IndexMap<String, EnumDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PoolDocument {
    #[serde(default)]
    messages: Vec<MessageDescriptor>,
    #[serde(default)]
    enums: Vec<EnumDescriptor>,
}

/// Strips the leading dot of a fully qualified reference.
pub(crate) fn normalize(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

impl DescriptorPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a pool from a YAML (or JSON) document of the form
    ///
    /// ```yaml
    /// messages:
    ///   - name: demo.Color
    ///     fields:
    ///       - { name: tags, kind: int32, repeated: true }
    ///       - { name: named, kind: enum, type_name: demo.ColorName, oneof: spec }
    /// enums:
    ///   - name: demo.ColorName
    ///     values:
    ///       - { name: RED, number: 0 }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Parse`] for malformed documents and the
    /// errors of [`add_message`](Self::add_message) /
    /// [`add_enum`](Self::add_enum) for duplicate names.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DescriptorError> {
        let document: PoolDocument =
            serde_yaml::from_str(yaml).map_err(|e| DescriptorError::Parse {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        let mut pool = Self::new();
        for message in document.messages {
            pool.add_message(message)?;
        }
        for enumeration in document.enums {
            pool.add_enum(enumeration)?;
        }

        tracing::debug!(
            messages = pool.messages.len(),
            enums = pool.enums.len(),
            "built descriptor pool from document"
        );
        Ok(pool)
    }

    /// Registers a message type.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::DuplicateType`] if the name is taken and
    /// [`DescriptorError::DuplicateField`] if two fields share a name.
    pub fn add_message(&mut self, mut message: MessageDescriptor) -> Result<(), DescriptorError> {
        message.full_name = normalize(&message.full_name).to_string();
        self.check_free(&message.full_name)?;

        let mut seen = HashSet::new();
        for field in &message.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DescriptorError::DuplicateField {
                    message: message.full_name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        self.messages.insert(message.full_name.clone(), message);
        Ok(())
    }

    /// Registers an enum type.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::DuplicateType`] if the name is taken.
    pub fn add_enum(&mut self, mut enumeration: EnumDescriptor) -> Result<(), DescriptorError> {
        enumeration.full_name = normalize(&enumeration.full_name).to_string();
        self.check_free(&enumeration.full_name)?;
        self.enums.insert(enumeration.full_name.clone(), enumeration);
        Ok(())
    }

    fn check_free(&self, name: &str) -> Result<(), DescriptorError> {
        if self.messages.contains_key(name) || self.enums.contains_key(name) {
            return Err(DescriptorError::DuplicateType(name.to_string()));
        }
        Ok(())
    }

    /// Looks up a message type by full name.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(normalize(name))
    }

    /// Looks up an enum type by full name.
    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(normalize(name))
    }

    /// All message types, in registration order.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDescriptor> {
        self.messages.values()
    }

    /// All enum types, in registration order.
    pub fn enums(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.enums.values()
    }

    /// Total number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.enums.len()
    }

    /// Whether the pool holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.enums.is_empty()
    }
}
