//! Synthesis configuration
//!
//! Tunables for the message synthesizer and the YAML loader that produces
//! them.

pub mod loader;
pub mod schema;

pub use loader::{load, load_from_str};
pub use schema::{Int64Range, SynthesisConfig};
