//! Conversion from compiled `FileDescriptorSet`s.
//!
//! `protoc --descriptor_set_out` (or `prost-build`) emits the schema as a
//! serialized `google.protobuf.FileDescriptorSet`. Type references in it are
//! already resolved to fully qualified names, so building a pool is a plain
//! walk over files and nested declarations.

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorSet,
};

use crate::error::DescriptorError;

use super::{DescriptorPool, EnumDescriptor, EnumValue, FieldDescriptor, MessageDescriptor, WireKind};

impl DescriptorPool {
    /// Builds a pool from every message and enum declared in `set`,
    /// including nested declarations.
    ///
    /// Map fields come through as repeated `...Entry` messages and are
    /// synthesized as such. Proto3 `optional` fields sit in single-member
    /// synthetic oneofs and are therefore always populated.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::DuplicateType`] or
    /// [`DescriptorError::DuplicateField`] for conflicting declarations, and
    /// [`DescriptorError::OneofIndexOutOfRange`] if a field names a oneof the
    /// message does not declare.
    pub fn from_file_descriptor_set(set: &FileDescriptorSet) -> Result<Self, DescriptorError> {
        let mut pool = Self::new();
        for file in &set.file {
            let scope = file.package().to_string();
            for message in &file.message_type {
                add_message_tree(&mut pool, &scope, message)?;
            }
            for enumeration in &file.enum_type {
                pool.add_enum(convert_enum(&scope, enumeration))?;
            }
        }

        tracing::debug!(
            files = set.file.len(),
            types = pool.len(),
            "built descriptor pool from file descriptor set"
        );
        Ok(pool)
    }

    /// Decodes a serialized `FileDescriptorSet` and builds a pool from it.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Decode`] if `bytes` is not a valid
    /// `FileDescriptorSet`, otherwise as
    /// [`from_file_descriptor_set`](Self::from_file_descriptor_set).
    pub fn decode_file_descriptor_set(bytes: &[u8]) -> Result<Self, DescriptorError> {
        let set = FileDescriptorSet::decode(bytes)?;
        Self::from_file_descriptor_set(&set)
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

fn add_message_tree(
    pool: &mut DescriptorPool,
    scope: &str,
    proto: &DescriptorProto,
) -> Result<(), DescriptorError> {
    let full_name = qualify(scope, proto.name());

    let fields = proto
        .field
        .iter()
        .map(|field| convert_field(&full_name, proto, field))
        .collect::<Result<Vec<_>, _>>()?;
    pool.add_message(MessageDescriptor {
        full_name: full_name.clone(),
        fields,
    })?;

    for nested in &proto.nested_type {
        add_message_tree(pool, &full_name, nested)?;
    }
    for enumeration in &proto.enum_type {
        pool.add_enum(convert_enum(&full_name, enumeration))?;
    }
    Ok(())
}

fn convert_field(
    message: &str,
    proto: &DescriptorProto,
    field: &FieldDescriptorProto,
) -> Result<FieldDescriptor, DescriptorError> {
    let kind = field.r#type.map_or_else(
        || WireKind::Unrecognized("unspecified".to_string()),
        |raw| {
            Type::try_from(raw).map_or_else(|_| WireKind::Unrecognized(format!("type#{raw}")), wire_kind)
        },
    );

    let oneof = field
        .oneof_index
        .map(|index| {
            usize::try_from(index)
                .ok()
                .and_then(|i| proto.oneof_decl.get(i))
                .map(|decl| decl.name().to_string())
                .ok_or_else(|| DescriptorError::OneofIndexOutOfRange {
                    message: message.to_string(),
                    field: field.name().to_string(),
                    index,
                })
        })
        .transpose()?;

    let type_name = field
        .type_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(|name| super::pool::normalize(name).to_string());

    Ok(FieldDescriptor {
        name: field.name().to_string(),
        kind,
        repeated: field.label() == Label::Repeated,
        oneof,
        type_name,
    })
}

const fn wire_kind(ty: Type) -> WireKind {
    match ty {
        Type::Double => WireKind::Double,
        Type::Float => WireKind::Float,
        Type::Int64 => WireKind::Int64,
        Type::Uint64 => WireKind::Uint64,
        Type::Int32 => WireKind::Int32,
        Type::Fixed64 => WireKind::Fixed64,
        Type::Fixed32 => WireKind::Fixed32,
        Type::Bool => WireKind::Bool,
        Type::String => WireKind::String,
        Type::Group | Type::Message => WireKind::Message,
        Type::Bytes => WireKind::Bytes,
        Type::Uint32 => WireKind::Uint32,
        Type::Enum => WireKind::Enum,
        Type::Sfixed32 => WireKind::Sfixed32,
        Type::Sfixed64 => WireKind::Sfixed64,
        Type::Sint32 => WireKind::Sint32,
        Type::Sint64 => WireKind::Sint64,
    }
}

fn convert_enum(scope: &str, proto: &EnumDescriptorProto) -> EnumDescriptor {
    EnumDescriptor {
        full_name: qualify(scope, proto.name()),
        values: proto
            .value
            .iter()
            .map(|value| EnumValue {
                name: value.name().to_string(),
                number: value.number(),
            })
            .collect(),
    }
}
