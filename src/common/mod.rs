//! Common types shared across the crate.
//!
//! This module provides the unified error type and the small style types
//! (colors, shape frames) used by both the OOXML layer and the analysis.

// Submodule declarations
pub mod error;
pub mod style;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{RGBColor, Rect, Third};
