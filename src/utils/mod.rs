//! Utils module - Shared utilities and helpers

/// Violation types and shared validation checks
pub mod validation;

/// Logging setup for the command-line binary
pub mod logging;

/// Display-width aware text helpers
pub mod text;

/// Tolerant serde field deserializers
pub mod lenient;
