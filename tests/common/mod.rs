//! Shared integration-test helpers: fixture loading and structural
//! comparison of synthesized messages.

#![allow(dead_code)]

use std::path::PathBuf;

use protofuzz::{DescriptorPool, SynthesizedMessage, SynthesizedValue};

/// Returns the absolute path of a file in `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Loads a descriptor pool from a YAML fixture.
#[allow(clippy::missing_panics_doc)]
pub fn load_pool(name: &str) -> DescriptorPool {
    let path = fixture_path(name);
    let yaml = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    DescriptorPool::from_yaml_str(&yaml)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

/// Structural skeleton of a value: variant names and nesting, no leaf data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Leaf(&'static str),
    Message(Vec<(String, Shape)>),
    Repeated(Vec<Shape>),
}

/// Computes the [`Shape`] of a message, with fields sorted by name.
pub fn message_shape(message: &SynthesizedMessage) -> Shape {
    let mut fields: Vec<(String, Shape)> = message
        .iter()
        .map(|(name, value)| (name.to_string(), value_shape(value)))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    Shape::Message(fields)
}

/// Computes the [`Shape`] of a single value.
pub fn value_shape(value: &SynthesizedValue) -> Shape {
    match value {
        SynthesizedValue::Message(message) => message_shape(message),
        SynthesizedValue::Repeated(elements) => {
            Shape::Repeated(elements.iter().map(value_shape).collect())
        }
        leaf => Shape::Leaf(leaf.kind_name()),
    }
}

/// Names of the fields of `message` that are among `candidates`.
pub fn present<'a>(message: &SynthesizedMessage, candidates: &[&'a str]) -> Vec<&'a str> {
    candidates
        .iter()
        .copied()
        .filter(|name| message.contains(name))
        .collect()
}

/// Pearson chi-square statistic of `observed` counts against a uniform
/// expectation.
#[allow(clippy::cast_precision_loss)]
pub fn chi_square_uniform(observed: &[usize]) -> f64 {
    let total: usize = observed.iter().sum();
    let expected = total as f64 / observed.len() as f64;
    observed
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
