//! Observability
//!
//! Logging setup for harnesses that embed the synthesizer. The library
//! itself only emits `tracing` events; nothing is printed unless a
//! subscriber is installed.

pub mod logging;

pub use logging::{ColorChoice, LogFormat, init_logging};
