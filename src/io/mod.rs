//! Input/output: command line, files, rendering and diagnostics

/// Command-line interface and run orchestration
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Error types and constructors
pub mod error;
/// Image decoding, window extraction, rendering and PNG export
pub mod image;
/// Stderr backend for the `log` facade
pub mod logging;
/// Terminal progress display
pub mod progress;
/// XML tile-set loading
pub mod rules;
/// Animated GIF capture of a run
pub mod visualization;
