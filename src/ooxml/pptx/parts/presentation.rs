//! Presentation part - the main part in a .pptx package.
//!
//! Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Default slide width (10in, 4:3) in EMUs.
pub const DEFAULT_SLIDE_WIDTH: i64 = 9_144_000;

/// Default slide height (7.5in, 4:3) in EMUs.
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// Slide dimensions in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SLIDE_WIDTH,
            height: DEFAULT_SLIDE_HEIGHT,
        }
    }
}

/// The main presentation part.
///
/// Only the slide size is read; slide order comes from the part names.
#[derive(Debug, Clone, Copy)]
pub struct PresentationPart<'a> {
    xml: &'a str,
}

impl<'a> PresentationPart<'a> {
    /// Create a PresentationPart from the XML text of the part.
    pub fn new(xml: &'a str) -> Self {
        Self { xml }
    }

    /// Slide size from `<p:sldSz cx cy>`.
    ///
    /// Missing or non-positive dimensions fall back to the 4:3 default, one
    /// axis at a time.
    pub fn slide_size(&self) -> Result<SlideSize> {
        let mut reader = Reader::from_str(self.xml);
        reader.config_mut().trim_text(true);

        let mut size = SlideSize::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldSz" {
                        for attr in e.attributes().flatten() {
                            let parsed: Option<i64> =
                                atoi_simd::parse::<i64, false, false>(&attr.value).ok();
                            let Some(value) = parsed.filter(|v| *v > 0) else {
                                continue;
                            };
                            match attr.key.as_ref() {
                                b"cx" => size.width = value,
                                b"cy" => size.height = value,
                                _ => {},
                            }
                        }
                        break;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(size)
    }
}
