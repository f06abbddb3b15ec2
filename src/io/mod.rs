/// Command-line interface and batch file processing
pub mod cli;
/// Packing constants and configuration defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Puzzle text parsing into shapes and regions
pub mod parse;
/// Progress bars and progress-aware logging
pub mod progress;
