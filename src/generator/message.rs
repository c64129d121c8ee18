//! Whole-message synthesis.

use rand::Rng;

use crate::descriptor::MessageDescriptor;
use crate::error::SynthesisError;

use super::{MessageSynthesizer, SynthesizedMessage, composite, oneof};

/// Synthesizes one complete instance of `message` at nesting level `depth`.
///
/// Oneof groups are resolved first; every field outside a group then
/// follows in declared order. Entering a level deeper than the configured
/// `max_depth` fails with [`SynthesisError::CyclicDescriptor`].
///
/// # Errors
///
/// See [`MessageSynthesizer::generate_message`].
pub fn synthesize_message<R: Rng>(
    synthesizer: &MessageSynthesizer<'_>,
    message: &MessageDescriptor,
    rng: &mut R,
    depth: usize,
) -> Result<SynthesizedMessage, SynthesisError> {
    let max_depth = synthesizer.config().max_depth;
    if depth > max_depth {
        return Err(SynthesisError::CyclicDescriptor {
            type_name: message.full_name.clone(),
            depth: max_depth,
        });
    }

    let mut output = oneof::resolve_oneofs(synthesizer, message, rng, depth)?;

    for field in message.plain_fields() {
        let value = composite::synthesize_field(synthesizer, message, field, rng, depth)?;
        if output.insert(field.name.as_str(), value).is_some() {
            return Err(SynthesisError::malformed(
                composite::field_path(message, field),
                "field name declared more than once",
            ));
        }
    }

    tracing::trace!(
        message = %message.full_name,
        depth,
        fields = output.len(),
        "synthesized message"
    );
    Ok(output)
}
