//! Configuration schema types.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How 64-bit integer kinds (`int64`, `uint64`, `sint64`, `fixed64`,
/// `sfixed64`) are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Int64Range {
    /// All eight random bytes are used; the whole 64-bit range is reachable.
    #[default]
    Full,

    /// Only the low four bytes are used and widened, so values stay within
    /// the 32-bit range of the same signedness.
    Low32,
}

/// Synthesizer tunables.
///
/// Every field has a default, so an empty YAML document yields
/// [`SynthesisConfig::default`].
///
/// ```yaml
/// repeated_count: 4
/// max_bytes_len: 1048575
/// max_string_len: 64
/// max_depth: 32
/// int64_range: full
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Number of elements produced for every repeated field
    #[serde(default = "SynthesisConfig::default_repeated_count")]
    pub repeated_count: usize,

    /// Inclusive upper bound on generated `bytes` lengths (default: 1 MiB - 1)
    #[serde(default = "SynthesisConfig::default_max_bytes_len")]
    pub max_bytes_len: usize,

    /// Inclusive upper bound on generated `string` lengths, in characters
    #[serde(default = "SynthesisConfig::default_max_string_len")]
    pub max_string_len: usize,

    /// Maximum nested-message depth before synthesis gives up
    #[serde(default = "SynthesisConfig::default_max_depth")]
    pub max_depth: usize,

    /// Fill mode for 64-bit integer kinds
    #[serde(default)]
    pub int64_range: Int64Range,
}

impl SynthesisConfig {
    /// Default repetition count for repeated fields.
    pub const DEFAULT_REPEATED_COUNT: usize = 4;

    /// Default maximum `bytes` length: 1,048,575 (one below 1 MiB).
    pub const DEFAULT_MAX_BYTES_LEN: usize = 1_048_575;

    /// Default maximum `string` length.
    pub const DEFAULT_MAX_STRING_LEN: usize = 64;

    /// Default nesting ceiling.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Upper limit accepted for `repeated_count`.
    pub const MAX_REPEATED_COUNT: usize = 1_024;

    /// Upper limit accepted for `max_bytes_len` and `max_string_len` (100MB).
    pub const MAX_LEN_LIMIT: usize = 104_857_600;

    /// Upper limit accepted for `max_depth`.
    ///
    /// Synthesis recurses once per nesting level, so the ceiling must be hit
    /// well before a 2 MiB thread stack runs out in an unoptimized build.
    pub const MAX_DEPTH_LIMIT: usize = 256;

    const fn default_repeated_count() -> usize {
        Self::DEFAULT_REPEATED_COUNT
    }

    const fn default_max_bytes_len() -> usize {
        Self::DEFAULT_MAX_BYTES_LEN
    }

    const fn default_max_string_len() -> usize {
        Self::DEFAULT_MAX_STRING_LEN
    }

    const fn default_max_depth() -> usize {
        Self::DEFAULT_MAX_DEPTH
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first field that is
    /// out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "repeated_count",
            self.repeated_count,
            0,
            Self::MAX_REPEATED_COUNT,
        )?;
        check_range("max_bytes_len", self.max_bytes_len, 0, Self::MAX_LEN_LIMIT)?;
        check_range("max_string_len", self.max_string_len, 0, Self::MAX_LEN_LIMIT)?;
        check_range("max_depth", self.max_depth, 1, Self::MAX_DEPTH_LIMIT)?;
        Ok(())
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            repeated_count: Self::DEFAULT_REPEATED_COUNT,
            max_bytes_len: Self::DEFAULT_MAX_BYTES_LEN,
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            int64_range: Int64Range::default(),
        }
    }
}

fn check_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("a value between {min} and {max}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = SynthesisConfig::default();
        assert_eq!(config.repeated_count, 4);
        assert_eq!(config.max_bytes_len, 1_048_575);
        assert_eq!(config.max_string_len, 64);
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.int64_range, Int64Range::Full);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SynthesisConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_repetition_is_valid() {
        let config = SynthesisConfig {
            repeated_count: 0,
            ..SynthesisConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = SynthesisConfig {
            max_depth: 0,
            ..SynthesisConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, .. } if field == "max_depth"),
            "expected InvalidValue for max_depth, got {err:?}"
        );
    }

    #[test]
    fn oversized_repetition_is_rejected() {
        let config = SynthesisConfig {
            repeated_count: SynthesisConfig::MAX_REPEATED_COUNT + 1,
            ..SynthesisConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("repeated_count"));
    }

    #[test]
    fn depth_above_limit_is_rejected() {
        let at_limit = SynthesisConfig {
            max_depth: SynthesisConfig::MAX_DEPTH_LIMIT,
            ..SynthesisConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = SynthesisConfig {
            max_depth: SynthesisConfig::MAX_DEPTH_LIMIT + 1,
            ..SynthesisConfig::default()
        };
        let err = over.validate().unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, value, .. } if field == "max_depth" && value == "257"),
            "expected InvalidValue for max_depth, got {err:?}"
        );
    }

    #[test]
    fn int64_range_serde_names() {
        let parsed: Int64Range = serde_json::from_str("\"low32\"").unwrap();
        assert_eq!(parsed, Int64Range::Low32);
        assert_eq!(serde_json::to_string(&Int64Range::Full).unwrap(), "\"full\"");
    }
}
