//! Command handlers for CLI operations
//!
//! Keeps command execution apart from parsing and validation.

pub mod serve;

pub use serve::ServeCommandHandler;
