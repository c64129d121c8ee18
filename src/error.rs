//! Error types for `protofuzz`
//!
//! Synthesis, descriptor-building and configuration failures, plus a
//! transparent umbrella type for callers that mix all three.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `protofuzz` operations.
#[derive(Debug, Error)]
pub enum ProtoFuzzError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Descriptor pool construction error
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Message synthesis error
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the configuration file (empty for in-memory sources)
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Descriptor Errors
// ============================================================================

/// Errors raised while assembling a [`DescriptorPool`](crate::descriptor::DescriptorPool).
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Two message or enum types share a full name
    #[error("duplicate type name: {0}")]
    DuplicateType(String),

    /// Two fields of one message share a name
    #[error("duplicate field '{field}' in message {message}")]
    DuplicateField {
        /// Full name of the offending message
        message: String,
        /// The repeated field name
        field: String,
    },

    /// A field refers to a oneof declaration that does not exist
    #[error("field '{field}' in message {message} has oneof index {index} out of range")]
    OneofIndexOutOfRange {
        /// Full name of the offending message
        message: String,
        /// Field carrying the bad index
        field: String,
        /// The out-of-range index
        index: i32,
    },

    /// Descriptor document could not be parsed
    #[error("descriptor parse error{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Encoded `FileDescriptorSet` could not be decoded
    #[error("descriptor set decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}

// ============================================================================
// Synthesis Errors
// ============================================================================

/// Errors raised while synthesizing a message.
///
/// An unrecognized numeric wire kind is deliberately absent: it is recovered
/// with a logged warning and a 64-bit float fallback.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The requested message type is not in the pool
    #[error("unknown message type: {0}")]
    UnknownMessage(String),

    /// The descriptor cannot be synthesized as declared
    #[error("malformed descriptor at {path}: {reason}")]
    MalformedDescriptor {
        /// Dotted path to the offending field (e.g. `pkg.Outer.inner`)
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Nested messages recurse deeper than the configured ceiling
    #[error("recursion limit {depth} reached while entering {type_name}; descriptor is likely cyclic")]
    CyclicDescriptor {
        /// Full name of the message that would have exceeded the ceiling
        type_name: String,
        /// The configured ceiling
        depth: usize,
    },
}

impl SynthesisError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `protofuzz` operations.
pub type Result<T> = std::result::Result<T, ProtoFuzzError>;

// ============================================================================
// Tests
// ============================================================================
