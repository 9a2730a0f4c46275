//! Configuration, host interfaces and input/output
//!
//! This module contains the configuration surface, the injected instance
//! factory, error handling, and everything the command-line tool needs.

/// Command-line argument parsing and batch generation
pub mod cli;
/// Defaults and level configuration
pub mod configuration;
/// Error types
pub mod error;
/// Injected host capability for instances
pub mod factory;
/// PNG layout previews
pub mod image;
/// Structured logging setup
pub mod logging;
/// Batch progress display
pub mod progress;
/// In-memory factory recording every call
pub mod recording;
