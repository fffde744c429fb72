//! Part relationships (`_rels/*.rels`).
//!
//! Only what the analysis needs: reading the relationships of a part and
//! resolving a relative target against the part's folder.
use crate::ooxml::error::Result;
use crate::ooxml::xml::XmlElement;

/// Relationship type suffix linking a slide to its layout.
pub const RT_SLIDE_LAYOUT: &str = "/slideLayout";

/// One `<Relationship>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub r_id: String,
    pub reltype: String,
    pub target: String,
    pub external: bool,
}

/// Name of the relationships part for `partname`.
///
/// `ppt/slides/slide1.xml` → `ppt/slides/_rels/slide1.xml.rels`
pub fn rels_partname(partname: &str) -> String {
    match partname.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{partname}.rels"),
    }
}

/// Parse a `.rels` document.
pub fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let root = XmlElement::parse(xml)?;
    Ok(root
        .children()
        .filter(|e| e.is("Relationship"))
        .filter_map(|e| {
            Some(Relationship {
                r_id: e.attr("Id").unwrap_or_default().to_string(),
                reltype: e.attr("Type")?.to_string(),
                target: e.attr("Target")?.to_string(),
                external: e.attr("TargetMode") == Some("External"),
            })
        })
        .collect())
}

/// Resolve `target` relative to the folder of `source_part`.
///
/// Absolute targets (leading `/`) are taken from the package root.
/// `..` and `.` segments are normalized.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute.split('/'), Vec::new());
    }
    let mut folder: Vec<&str> = source_part.split('/').collect();
    folder.pop();
    normalize(target.split('/'), folder)
}

fn normalize<'a>(parts: impl Iterator<Item = &'a str>, mut base: Vec<&'a str>) -> String {
    for part in parts {
        match part {
            "" | "." => {},
            ".." => {
                base.pop();
            },
            other => base.push(other),
        }
    }
    base.join("/")
}

/// Layout part referenced by a slide, if its relationships name one.
pub fn slide_layout_target(slide_part: &str, rels: &[Relationship]) -> Option<String> {
    rels.iter()
        .find(|rel| !rel.external && rel.reltype.ends_with(RT_SLIDE_LAYOUT))
        .map(|rel| resolve_target(slide_part, &rel.target))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_rels_partname() {
        assert_eq!(
            rels_partname("ppt/slides/slide1.xml"),
            "ppt/slides/_rels/slide1.xml.rels"
        );
    }

    #[test]
    fn test_layout_target() {
        let rels = parse_relationships(SLIDE_RELS).unwrap();
        assert_eq!(rels.len(), 3);
        assert!(rels[2].external);
        assert_eq!(
            slide_layout_target("ppt/slides/slide1.xml", &rels).as_deref(),
            Some("ppt/slideLayouts/slideLayout2.xml")
        );
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "./../media/./a.png"),
            "ppt/media/a.png"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "/ppt/slideLayouts/slideLayout1.xml"),
            "ppt/slideLayouts/slideLayout1.xml"
        );
    }
}
