//! Scalar synthesis: numbers, byte blobs, strings, booleans and enum ordinals.
//!
//! Numbers are built by drawing eight random bytes and reinterpreting them
//! little-endian as the field's native representation, so every bit pattern
//! (including NaNs and infinities for floating-point kinds) is reachable.

use rand::Rng;

use crate::config::Int64Range;
use crate::descriptor::WireKind;

use super::SynthesizedValue;

/// Number of random bytes drawn per numeric value.
pub const NUMBER_WIDTH: usize = 8;

/// Draws eight random bytes and reinterprets them as a value of `kind`.
///
/// Returns `None` for kinds without a numeric representation; see
/// [`number_from_bytes`].
pub fn random_number<R: Rng>(
    kind: &WireKind,
    int64_range: Int64Range,
    rng: &mut R,
) -> Option<SynthesizedValue> {
    let mut buf = [0u8; NUMBER_WIDTH];
    rng.fill_bytes(&mut buf);
    number_from_bytes(kind, int64_range, buf)
}

/// Reinterprets `buf` as a value of `kind`.
///
/// 32-bit kinds read the low four bytes. 64-bit integer kinds read all eight
/// bytes under [`Int64Range::Full`], or widen the low four under
/// [`Int64Range::Low32`]. [`WireKind::Unrecognized`] is logged and falls back
/// to a `double` built from the same bytes. `bool`, `string`, `bytes`, `enum`
/// and `message` yield `None`.
#[must_use]
pub fn number_from_bytes(
    kind: &WireKind,
    int64_range: Int64Range,
    buf: [u8; NUMBER_WIDTH],
) -> Option<SynthesizedValue> {
    let [b0, b1, b2, b3, ..] = buf;
    let low = [b0, b1, b2, b3];

    let value = match kind {
        WireKind::Double => SynthesizedValue::Double(f64::from_le_bytes(buf)),
        WireKind::Float => SynthesizedValue::Float(f32::from_le_bytes(low)),
        WireKind::Int32 | WireKind::Sint32 | WireKind::Sfixed32 => {
            SynthesizedValue::Int32(i32::from_le_bytes(low))
        }
        WireKind::Uint32 | WireKind::Fixed32 => SynthesizedValue::Uint32(u32::from_le_bytes(low)),
        WireKind::Int64 | WireKind::Sint64 | WireKind::Sfixed64 => {
            SynthesizedValue::Int64(match int64_range {
                Int64Range::Full => i64::from_le_bytes(buf),
                Int64Range::Low32 => i64::from(i32::from_le_bytes(low)),
            })
        }
        WireKind::Uint64 | WireKind::Fixed64 => SynthesizedValue::Uint64(match int64_range {
            Int64Range::Full => u64::from_le_bytes(buf),
            Int64Range::Low32 => u64::from(u32::from_le_bytes(low)),
        }),
        WireKind::Unrecognized(keyword) => {
            tracing::warn!(kind = %keyword, "unrecognized numeric kind, falling back to double");
            SynthesizedValue::Double(f64::from_le_bytes(buf))
        }
        WireKind::Bool
        | WireKind::String
        | WireKind::Bytes
        | WireKind::Enum
        | WireKind::Message => return None,
    };
    Some(value)
}

/// Draws a blob length uniformly from `0..=max_len`.
pub fn random_blob_len<R: Rng>(rng: &mut R, max_len: usize) -> usize {
    rng.random_range(0..=max_len)
}

/// Returns between `0` and `max_len` (inclusive) uniformly random bytes.
pub fn random_bytes<R: Rng>(rng: &mut R, max_len: usize) -> Vec<u8> {
    let len = random_blob_len(rng, max_len);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Returns a string of between `0` and `max_chars` (inclusive) uniformly
/// random Unicode scalar values.
pub fn random_string<R: Rng>(rng: &mut R, max_chars: usize) -> String {
    let len = rng.random_range(0..=max_chars);
    (0..len).map(|_| rng.random::<char>()).collect()
}

/// Returns an ordinal drawn uniformly from `0..size`.
///
/// `size` must be non-zero; callers check enum shape first.
pub fn random_ordinal<R: Rng>(rng: &mut R, size: usize) -> usize {
    rng.random_range(0..size)
}
