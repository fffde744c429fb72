//! PowerPoint (.pptx) presentation support.
//!
//! Reading a presentation for analysis goes through these layers:
//!
//! - [`locate_slides`]: find and order the slide parts in `ppt/slides/`
//! - [`SlidePart`]: extract text runs, title and structure from one slide
//! - [`ThemePart`]: read the theme's color scheme and fonts
//! - [`PresentationPart`]: read deck-level properties such as slide size
//!
//! # Example
//!
//! ```rust,no_run
//! use lesson_lens::config::AnalyzerConfig;
//! use lesson_lens::ooxml::PptxArchive;
//! use lesson_lens::ooxml::pptx::{SlidePart, locate_slides};
//!
//! let data = std::fs::read("lesson.pptx")?;
//! let mut archive = PptxArchive::open(&data)?;
//! let located = locate_slides(archive.list_entries("ppt/slides/"));
//! for (i, name) in located.parts.iter().enumerate() {
//!     let xml = archive.read_entry_as_text(name)?;
//!     let content = SlidePart::new(name, &xml).extract(i + 1, &AnalyzerConfig::default())?;
//!     println!("{}: {}", content.slide_index, content.title);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod backgrounds;
pub mod content;
pub mod locator;
pub mod parts;

pub use backgrounds::{resolve_background_color, solid_background};
pub use content::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PT, LayoutHint, PlaceholderKind, RawTextRun,
    SlideContent,
};
pub use locator::{LocatedSlides, LocatorTier, locate_slides, slide_number};
pub use parts::{
    PresentationPart, SlidePart, SlideSize, ThemePart, TitleSource,
};
