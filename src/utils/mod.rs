//! Utils module - Shared utilities and helpers

/// Error conversion helpers
pub mod error_helpers;

/// Verbose output and log subscriber setup
pub mod logging;

/// Input validation
pub mod validation;
