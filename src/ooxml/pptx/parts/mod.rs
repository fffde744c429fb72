/// Parts for PowerPoint presentation documents.
///
/// Each type wraps the XML text of one part of a .pptx package.
pub mod presentation;
pub mod slide;
pub mod theme;

pub use presentation::{PresentationPart, SlideSize};
pub use slide::{SlidePart, TitleSource};
pub use theme::ThemePart;
