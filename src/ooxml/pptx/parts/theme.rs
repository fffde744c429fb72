//! Theme parts for PowerPoint presentations.
//!
//! Only the color values and the font scheme are read.
use crate::common::style::RGBColor;
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Theme part - defines the visual styling of a presentation.
///
/// Corresponds to `/ppt/theme/themeN.xml` in the package.
#[derive(Debug, Clone, Copy)]
pub struct ThemePart<'a> {
    xml: &'a str,
}

impl<'a> ThemePart<'a> {
    /// Create a ThemePart from the XML text of the part.
    pub fn new(xml: &'a str) -> Self {
        Self { xml }
    }

    /// Latin typefaces of the theme's font scheme: major (headings) first,
    /// then minor (body), without duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lesson_lens::ooxml::pptx::ThemePart;
    ///
    /// let xml = r#"<a:theme xmlns:a="a" name="Office"><a:themeElements><a:fontScheme name="Office">
    ///   <a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont>
    ///   <a:minorFont><a:latin typeface="Calibri"/></a:minorFont>
    /// </a:fontScheme></a:themeElements></a:theme>"#;
    /// let fonts = ThemePart::new(xml).font_families()?;
    /// assert_eq!(fonts, vec!["Calibri Light", "Calibri"]);
    /// # Ok::<(), lesson_lens::ooxml::OoxmlError>(())
    /// ```
    pub fn font_families(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(self.xml);
        reader.config_mut().trim_text(true);

        let mut major: Option<String> = None;
        let mut minor: Option<String> = None;
        let mut in_major_font = false;
        let mut in_minor_font = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"majorFont" => in_major_font = true,
                    b"minorFont" => in_minor_font = true,
                    b"latin" if in_major_font && major.is_none() => {
                        major = attr_value(e, b"typeface").filter(|t| !t.is_empty());
                    },
                    b"latin" if in_minor_font && minor.is_none() => {
                        minor = attr_value(e, b"typeface").filter(|t| !t.is_empty());
                    },
                    _ => {},
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"majorFont" => in_major_font = false,
                    b"minorFont" => in_minor_font = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        let mut fonts: Vec<String> = major.into_iter().collect();
        if let Some(minor) = minor {
            if !fonts.contains(&minor) {
                fonts.push(minor);
            }
        }
        Ok(fonts)
    }

    /// Every RGB value in the theme, first-seen order, without duplicates.
    ///
    /// Reads `<a:srgbClr val>` and the saved `lastClr` of `<a:sysClr>`
    /// anywhere in the part (color scheme, fill styles, effect styles).
    /// Values that are not exactly six hex digits are skipped.
    pub fn color_values(&self) -> Result<Vec<RGBColor>> {
        let mut reader = Reader::from_str(self.xml);
        reader.config_mut().trim_text(true);

        let mut colors: Vec<RGBColor> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let value = match e.local_name().as_ref() {
                        b"srgbClr" => attr_value(e, b"val"),
                        b"sysClr" => attr_value(e, b"lastClr"),
                        _ => None,
                    };
                    if let Some(color) = value.as_deref().and_then(RGBColor::from_hex) {
                        if !colors.contains(&color) {
                            colors.push(color);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(colors)
    }
}

/// Value of the attribute with local name `key`.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_string))
}
