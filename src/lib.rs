//! Lesson Lens - structure extraction and classification for lesson presentations
//!
//! This library reads PowerPoint (.pptx) lesson decks and describes them: which
//! slides they contain, how each slide is laid out, what pedagogical activity
//! it serves, and what visual design system the deck follows. Many decks can
//! be summarized together into a style profile.
//!
//! # Features
//!
//! - **Tolerant OOXML reading**: slide parts are located whatever the exporter
//!   named them, XML is matched by local name regardless of namespace prefix
//! - **Slide extraction**: text runs with size, font and color, title detection,
//!   pictures, tables, bullets and backgrounds
//! - **Classification**: activity and content labels from layered keyword,
//!   structural and positional strategies
//! - **Aggregation**: per-deck [`LessonStructure`] and cross-deck [`CorpusSummary`],
//!   serializable to JSON
//! - **Graceful degradation**: a malformed slide becomes a placeholder, a
//!   malformed file is reported and skipped
//!
//! # Example - Analyzing one presentation
//!
//! ```no_run
//! use lesson_lens::config::AnalyzerConfig;
//! use lesson_lens::lesson::analyze_presentation;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("lesson.pptx")?;
//! let lesson = analyze_presentation(&data, &AnalyzerConfig::default())?;
//!
//! println!("{} slides", lesson.total_slides);
//! for (i, activity) in lesson.lesson_flow.iter().enumerate() {
//!     println!("{:>2}: {}", i + 1, activity);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Building a style profile from a corpus
//!
//! ```no_run
//! use lesson_lens::config::load_config;
//! use lesson_lens::lesson::analyze_corpus;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let files: Vec<(String, Vec<u8>)> = ["week1.pptx", "week2.pptx"]
//!     .iter()
//!     .map(|name| Ok((name.to_string(), std::fs::read(name)?)))
//!     .collect::<std::io::Result<_>>()?;
//!
//! let run = analyze_corpus(&files, &config);
//! for failure in &run.failures {
//!     eprintln!("skipped {}: {}", failure.name, failure.error);
//! }
//! println!("{}", run.style_profile()?.to_json()?);
//! # Ok(())
//! # }
//! ```

/// Common types and utilities shared across the crate
pub mod common;

/// Analyzer configuration
pub mod config;

/// Pedagogical analysis: classification, aggregation, pipeline
pub mod lesson;

/// OOXML (Office Open XML) access for .pptx packages
///
/// Provides the ZIP container, a prefix-independent XML tree and the
/// presentation parts.
pub mod ooxml;

// Re-export commonly used types
pub use common::{Error, Result};
pub use config::AnalyzerConfig;
pub use lesson::{CorpusSummary, LessonStructure, SlideAnalysis};
