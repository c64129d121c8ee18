//! Oneof resolution.
//!
//! Every oneof group contributes exactly one field to the output, chosen
//! uniformly among its members. Unselected members are left out entirely.

use indexmap::IndexMap;
use rand::Rng;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::error::SynthesisError;

use super::{MessageSynthesizer, SynthesizedMessage, composite};

/// Groups the oneof members of `message` by group name.
///
/// Groups appear in the order their first member is declared; members keep
/// declaration order within a group.
#[must_use]
pub fn group_oneofs(message: &MessageDescriptor) -> IndexMap<&str, Vec<&FieldDescriptor>> {
    let mut groups: IndexMap<&str, Vec<&FieldDescriptor>> = IndexMap::new();
    for field in &message.fields {
        if let Some(group) = field.oneof.as_deref() {
            groups.entry(group).or_default().push(field);
        }
    }
    groups
}

/// Picks a member index uniformly from `0..member_count`.
///
/// `member_count` is never zero for a group built by [`group_oneofs`].
pub fn pick_member<R: Rng>(rng: &mut R, member_count: usize) -> usize {
    rng.random_range(0..member_count)
}

/// Synthesizes one member of every oneof group of `message`.
///
/// # Errors
///
/// Propagates errors from synthesizing the selected members.
pub fn resolve_oneofs<R: Rng>(
    synthesizer: &MessageSynthesizer<'_>,
    message: &MessageDescriptor,
    rng: &mut R,
    depth: usize,
) -> Result<SynthesizedMessage, SynthesisError> {
    let mut output = SynthesizedMessage::new();

    for (group, members) in group_oneofs(message) {
        let index = pick_member(rng, members.len());
        let Some(field) = members.get(index) else {
            continue;
        };

        tracing::trace!(
            message = %message.full_name,
            group,
            selected = %field.name,
            members = members.len(),
            "resolved oneof"
        );

        let value = composite::synthesize_field(synthesizer, message, field, rng, depth)?;
        if output.insert(field.name.as_str(), value).is_some() {
            return Err(SynthesisError::malformed(
                composite::field_path(message, field),
                "field name declared more than once",
            ));
        }
    }

    Ok(output)
}
