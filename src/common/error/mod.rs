//! Unified error types for the crate.
//!
//! The OOXML layer has its own [`crate::ooxml::OoxmlError`]; everything that
//! leaves the crate through the analysis pipeline is an [`Error`].

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
