//! Random message synthesis.
//!
//! Walks a [`MessageDescriptor`] and produces a [`SynthesizedMessage`] that
//! satisfies every structural constraint of the schema, with leaf values
//! drawn from an injected random source.
//!
//! # Architecture
//!
//! ```text
//! MessageSynthesizer::generate(name, rng)
//!   └─ message::synthesize_message          oneofs first, then plain fields
//!        ├─ oneof::resolve_oneofs           one member per group
//!        └─ composite::synthesize_field     repeated / kind dispatch
//!             ├─ scalar::*                  numbers, bytes, strings, enums
//!             └─ message::synthesize_message   (nested messages, depth + 1)
//! ```
//!
//! The synthesizer only borrows the pool; each call owns nothing but the
//! value it returns. The same synthesizer may be shared across threads as
//! long as each thread brings its own RNG.

pub mod composite;
pub mod message;
pub mod oneof;
pub mod scalar;
mod value;

pub use value::{SynthesizedMessage, SynthesizedValue};

use rand::Rng;

use crate::config::SynthesisConfig;
use crate::descriptor::{DescriptorPool, MessageDescriptor};
use crate::error::{ConfigError, SynthesisError};

/// Depth assigned to the top-level message of a synthesis call.
pub const ROOT_DEPTH: usize = 1;

/// Produces random messages for the types of one [`DescriptorPool`].
#[derive(Debug, Clone)]
pub struct MessageSynthesizer<'a> {
    pool: &'a DescriptorPool,
    config: SynthesisConfig,
}

impl<'a> MessageSynthesizer<'a> {
    /// Creates a synthesizer with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `config` is out of range.
    pub fn new(pool: &'a DescriptorPool, config: SynthesisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(types = pool.len(), ?config, "created message synthesizer");
        Ok(Self { pool, config })
    }

    /// Creates a synthesizer with [`SynthesisConfig::default`].
    #[must_use]
    pub fn with_defaults(pool: &'a DescriptorPool) -> Self {
        Self {
            pool,
            config: SynthesisConfig::default(),
        }
    }

    /// The pool nested type names are resolved against.
    #[must_use]
    pub const fn pool(&self) -> &'a DescriptorPool {
        self.pool
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesizes a random instance of the message type `message_name`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::UnknownMessage`] if the pool has no such
    /// type, and otherwise as [`generate_message`](Self::generate_message).
    pub fn generate<R: Rng>(
        &self,
        message_name: &str,
        rng: &mut R,
    ) -> Result<SynthesizedMessage, SynthesisError> {
        let message = self
            .pool
            .message(message_name)
            .ok_or_else(|| SynthesisError::UnknownMessage(message_name.to_string()))?;
        self.generate_message(message, rng)
    }

    /// Synthesizes a random instance of `message`.
    ///
    /// `message` need not be registered in the pool, but its nested type
    /// names are resolved through it.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::MalformedDescriptor`] if a reached field has
    /// a missing or dangling nested type, or an empty or non-contiguous enum,
    /// and [`SynthesisError::CyclicDescriptor`] if nesting exceeds
    /// [`SynthesisConfig::max_depth`].
    pub fn generate_message<R: Rng>(
        &self,
        message: &MessageDescriptor,
        rng: &mut R,
    ) -> Result<SynthesizedMessage, SynthesisError> {
        message::synthesize_message(self, message, rng, ROOT_DEPTH)
    }
}

/// Synthesizes a random instance of `message_name` using the default
/// configuration.
///
/// # Errors
///
/// As [`MessageSynthesizer::generate`].
pub fn generate<R: Rng>(
    pool: &DescriptorPool,
    message_name: &str,
    rng: &mut R,
) -> Result<SynthesizedMessage, SynthesisError> {
    MessageSynthesizer::with_defaults(pool).generate(message_name, rng)
}
