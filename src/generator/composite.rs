//! Per-field dispatch: repetition, nested messages and kind selection.

use rand::Rng;

use crate::descriptor::{EnumDescriptor, FieldDescriptor, MessageDescriptor, WireKind};
use crate::error::SynthesisError;

use super::{MessageSynthesizer, SynthesizedValue, message, scalar};

/// Dotted path used in error reports, e.g. `demo.Color.named`.
pub(crate) fn field_path(owner: &MessageDescriptor, field: &FieldDescriptor) -> String {
    format!("{}.{}", owner.full_name, field.name)
}

/// Synthesizes the value of `field`, declared on `owner`.
///
/// Repeated fields yield [`SynthesizedValue::Repeated`] holding exactly
/// `repeated_count` independently drawn elements; singular fields yield one
/// element.
///
/// # Errors
///
/// Returns [`SynthesisError::MalformedDescriptor`] for a `message`/`enum`
/// field whose nested type is missing, dangling, empty or non-contiguous,
/// and propagates errors from nested messages.
pub fn synthesize_field<R: Rng>(
    synthesizer: &MessageSynthesizer<'_>,
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
    rng: &mut R,
    depth: usize,
) -> Result<SynthesizedValue, SynthesisError> {
    if field.repeated {
        let elements = (0..synthesizer.config().repeated_count)
            .map(|_| synthesize_single(synthesizer, owner, field, rng, depth))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(SynthesizedValue::Repeated(elements));
    }

    synthesize_single(synthesizer, owner, field, rng, depth)
}

fn synthesize_single<R: Rng>(
    synthesizer: &MessageSynthesizer<'_>,
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
    rng: &mut R,
    depth: usize,
) -> Result<SynthesizedValue, SynthesisError> {
    let config = synthesizer.config();

    match &field.kind {
        WireKind::Message => {
            let nested = resolve_message(synthesizer, owner, field)?;
            message::synthesize_message(synthesizer, nested, rng, depth + 1)
                .map(SynthesizedValue::Message)
        }
        WireKind::Enum => {
            let enumeration = resolve_enum(synthesizer, owner, field)?;
            let size = enumeration
                .contiguous_len()
                .map_err(|reason| SynthesisError::malformed(field_path(owner, field), reason))?;
            let ordinal = scalar::random_ordinal(rng, size);
            i32::try_from(ordinal).map(SynthesizedValue::Enum).map_err(|_| {
                SynthesisError::malformed(field_path(owner, field), "enum ordinal exceeds int32")
            })
        }
        WireKind::Bytes => Ok(SynthesizedValue::Bytes(scalar::random_bytes(
            rng,
            config.max_bytes_len,
        ))),
        WireKind::String => Ok(SynthesizedValue::String(scalar::random_string(
            rng,
            config.max_string_len,
        ))),
        WireKind::Bool => Ok(SynthesizedValue::Bool(rng.random())),
        kind @ (WireKind::Double
        | WireKind::Float
        | WireKind::Int32
        | WireKind::Int64
        | WireKind::Uint32
        | WireKind::Uint64
        | WireKind::Sint32
        | WireKind::Sint64
        | WireKind::Fixed32
        | WireKind::Fixed64
        | WireKind::Sfixed32
        | WireKind::Sfixed64
        | WireKind::Unrecognized(_)) => scalar::random_number(kind, config.int64_range, rng)
            .ok_or_else(|| {
                SynthesisError::malformed(
                    field_path(owner, field),
                    format!("{kind} has no numeric representation"),
                )
            }),
    }
}

fn nested_name<'f>(
    owner: &MessageDescriptor,
    field: &'f FieldDescriptor,
) -> Result<&'f str, SynthesisError> {
    field.type_name.as_deref().ok_or_else(|| {
        SynthesisError::malformed(
            field_path(owner, field),
            format!("{} field has no nested type", field.kind),
        )
    })
}

fn resolve_message<'p>(
    synthesizer: &MessageSynthesizer<'p>,
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
) -> Result<&'p MessageDescriptor, SynthesisError> {
    let name = nested_name(owner, field)?;
    synthesizer.pool().message(name).ok_or_else(|| {
        SynthesisError::malformed(
            field_path(owner, field),
            format!("message type {name} is not in the descriptor pool"),
        )
    })
}

fn resolve_enum<'p>(
    synthesizer: &MessageSynthesizer<'p>,
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
) -> Result<&'p EnumDescriptor, SynthesisError> {
    let name = nested_name(owner, field)?;
    synthesizer.pool().enumeration(name).ok_or_else(|| {
        SynthesisError::malformed(
            field_path(owner, field),
            format!("enum type {name} is not in the descriptor pool"),
        )
    })
}
