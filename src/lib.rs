//! `protofuzz` - random but structurally valid protobuf messages
//!
//! Given a message-type descriptor, synthesizes an instance that respects
//! every structural rule of the schema (nested messages, repeated fields,
//! enum ranges, exactly one member per oneof group) while filling leaves
//! with uniform randomness. Intended as fuzz input for services that accept
//! protobuf messages; encoding and transport are left to the caller.
//!
//! # Quick start
//!
//! ```
//! use protofuzz::{DescriptorPool, MessageSynthesizer, SynthesisConfig};
//! use rand::SeedableRng;
//!
//! let pool = DescriptorPool::from_yaml_str(
//!     r"
//! messages:
//!   - name: demo.Color
//!     fields:
//!       - { name: rgbHex, kind: bytes, oneof: spec }
//!       - { name: named, kind: enum, type_name: demo.ColorName, oneof: spec }
//!       - { name: index, kind: int32, oneof: spec }
//!       - { name: tags, kind: int32, repeated: true }
//! enums:
//!   - name: demo.ColorName
//!     values:
//!       - { name: RED, number: 0 }
//!       - { name: GREEN, number: 1 }
//! ",
//! )?;
//!
//! let config = SynthesisConfig { max_bytes_len: 16, ..SynthesisConfig::default() };
//! let synthesizer = MessageSynthesizer::new(&pool, config)?;
//!
//! // A seeded RNG makes the output reproducible.
//! let mut rng = rand::rngs::StdRng::seed_from_u64(8927);
//! let color = synthesizer.generate("demo.Color", &mut rng)?;
//!
//! let chosen = ["rgbHex", "named", "index"].iter().filter(|f| color.contains(f)).count();
//! assert_eq!(chosen, 1);
//! assert_eq!(color.get("tags").and_then(|t| t.as_repeated()).map(<[_]>::len), Some(4));
//! # Ok::<(), protofuzz::error::ProtoFuzzError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod observability;

pub use config::{Int64Range, SynthesisConfig};
pub use descriptor::{
    DescriptorPool, EnumDescriptor, EnumValue, FieldDescriptor, MessageDescriptor, WireKind,
};
pub use error::{ConfigError, DescriptorError, ProtoFuzzError, SynthesisError};
pub use generator::{MessageSynthesizer, SynthesizedMessage, SynthesizedValue, generate};
