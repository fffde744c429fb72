//! Office Open XML (OOXML) access for PowerPoint packages.
//!
//! The module is organized in layers:
//!
//! 1. **Container** (`archive`): the ZIP package and its entries
//! 2. **XML** (`xml`, `rels`): a prefix-independent element tree and part relationships
//! 3. **Presentation** (`pptx`): slides, themes and presentation properties
//!
//! # Example
//!
//! ```rust,no_run
//! use lesson_lens::ooxml::PptxArchive;
//!
//! let data = std::fs::read("lesson.pptx")?;
//! let archive = PptxArchive::open(&data)?;
//! println!("{} entries", archive.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod archive;
pub mod error;
pub mod pptx;
pub mod rels;
pub mod xml;

pub use archive::PptxArchive;
pub use error::{OoxmlError, Result};
pub use xml::XmlElement;
