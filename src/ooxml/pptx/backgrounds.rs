//! Slide background detection.
//!
//! Backgrounds live in `<p:cSld><p:bg>` of a slide, its layout or its master.
//! Only a solid fill color is reported; gradient, picture and pattern fills
//! count as no color and fall through to the next part.

use crate::common::style::RGBColor;
use crate::ooxml::xml::XmlElement;

/// Solid background color declared by a slide, layout or master document.
///
/// `<p:bgPr>` holds an explicit fill; `<p:bgRef>` references the theme but
/// may carry an RGB override as its child. Returns `None` when the part has
/// no `<p:bg>` or its fill is not a solid RGB color.
pub fn solid_background(root: &XmlElement) -> Option<RGBColor> {
    let bg = root.find("bg")?;
    match bg.child("bgPr") {
        Some(bg_pr) => bg_pr
            .children()
            .find(|fill| {
                matches!(fill.name(), "solidFill" | "gradFill" | "blipFill" | "pattFill")
            })
            .filter(|fill| fill.name() == "solidFill")
            .and_then(rgb_of),
        None => bg.child("bgRef").and_then(rgb_of),
    }
}

/// First valid `srgbClr` value below `element`.
fn rgb_of(element: &XmlElement) -> Option<RGBColor> {
    element
        .find("srgbClr")
        .and_then(|clr| clr.attr("val"))
        .and_then(RGBColor::from_hex)
}

/// Background color of a slide, falling back to its layout and then white.
pub fn resolve_background_color(slide: &XmlElement, layout: Option<&XmlElement>) -> RGBColor {
    solid_background(slide)
        .or_else(|| layout.and_then(solid_background))
        .unwrap_or(RGBColor::WHITE)
}
