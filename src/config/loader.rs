//! YAML loading for [`SynthesisConfig`].

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::schema::SynthesisConfig;

/// Loads and validates a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if the file cannot be read,
/// [`ConfigError::ParseError`] if it is not valid YAML for the schema, and
/// [`ConfigError::InvalidValue`] if a value is out of range.
pub fn load(path: &Path) -> Result<SynthesisConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;
    parse(&raw, path)
}

/// Parses and validates configuration from an in-memory YAML document.
///
/// An empty document yields the default configuration.
///
/// # Errors
///
/// Same as [`load`], minus the file access failure.
pub fn load_from_str(yaml: &str) -> Result<SynthesisConfig, ConfigError> {
    parse(yaml, &PathBuf::new())
}

fn parse(raw: &str, path: &Path) -> Result<SynthesisConfig, ConfigError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let root: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })?;

    let config = if root.is_null() {
        SynthesisConfig::default()
    } else {
        serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: format!("failed to deserialize configuration: {e}"),
        })?
    };

    config.validate()?;
    tracing::debug!(path = %path.display(), ?config, "loaded synthesis config");
    Ok(config)
}
