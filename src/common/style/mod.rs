//! Common style and geometry types.
//!
//! This module provides the color and position types shared by the slide
//! extractor and the aggregators.

// Submodule declarations
pub mod color;
pub mod geometry;

// Re-exports
pub use color::RGBColor;
pub use geometry::{Rect, Third};
