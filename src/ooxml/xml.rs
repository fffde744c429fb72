//! Namespace-agnostic XML tree for OOXML parts.
//!
//! OOXML producers disagree on namespace prefixes (`a:`, `p:`, `dgm:`, or
//! none at all for default namespaces), so every element and attribute is
//! stored under its *local* name. Queries such as [`XmlElement::find`] match
//! local names only, which keeps the slide extractor independent of the
//! prefixes a particular export tool chose.
//!
//! The tree is built once per part with `quick-xml`'s pull reader and is
//! small enough (a slide is rarely more than a few hundred elements) that
//! the convenience of random access outweighs streaming.
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

/// Deepest element nesting accepted in a part.
///
/// Real slides stay well below a few dozen levels; anything deeper is
/// rejected as malformed so the recursive tree walks stay bounded.
pub const MAX_DEPTH: usize = 512;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its local name, attributes and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    ///
    /// Comments, processing instructions and the XML declaration are dropped.
    /// Mismatched or unclosed tags, and nesting deeper than [`MAX_DEPTH`],
    /// are reported as [`OoxmlError::Xml`].
    pub fn parse(xml: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(OoxmlError::Xml(format!(
                            "element nesting exceeds {MAX_DEPTH} levels"
                        )));
                    }
                    stack.push(Self::from_start(&e)?);
                },
                Ok(Event::Empty(e)) => {
                    let element = Self::from_start(&e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| OoxmlError::Xml("unbalanced end tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::Text(e)) => {
                    if let Some(top) = stack.last_mut() {
                        let raw = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        top.push_text(raw);
                    }
                },
                Ok(Event::CData(e)) => {
                    if let Some(top) = stack.last_mut() {
                        let raw = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        top.push_text(raw);
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(top) = stack.last_mut() {
                        top.push_text(&resolve_reference(&e)?);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        if !stack.is_empty() {
            return Err(OoxmlError::Xml(format!(
                "unexpected end of document: {} unclosed element(s)",
                stack.len()
            )));
        }

        root.ok_or_else(|| OoxmlError::Xml("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| OoxmlError::Xml(e.to_string()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = attr.key.local_name();
            let key = std::str::from_utf8(key.as_ref())
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            attributes.push((key.to_string(), value.into_owned()));
        }

        Ok(XmlElement {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlNode::Element(element));
                Ok(())
            },
            None if root.is_none() => {
                *root = Some(element);
                Ok(())
            },
            None => Err(OoxmlError::Xml("multiple root elements".to_string())),
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Local name of the element (prefix stripped).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the element's local name is `name`.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Value of the attribute with local name `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute parsed as an integer.
    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        let value = self.attr(name)?;
        atoi_simd::parse::<i64, false, false>(value.trim().as_bytes()).ok()
    }

    /// Direct child elements.
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child with local name `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children().find(|e| e.is(name))
    }

    /// All descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a XmlElement>) {
        for child in self.children() {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    /// First descendant (document order) with local name `name`.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in self.children() {
            if child.is(name) {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant with local name `name`, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&XmlElement> {
        self.descendants()
            .into_iter()
            .filter(|e| e.is(name))
            .collect()
    }

    /// Whether any descendant has one of the given local names.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        self.children()
            .any(|child| names.contains(&child.name()) || child.contains_any(names))
    }

    /// Text held directly by this element (not its descendants).
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

/// Text of a `&name;` reference met in element content.
///
/// Character references and the five predefined entities are resolved.
/// Unknown entities are kept verbatim.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| OoxmlError::Xml(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = std::str::from_utf8(reference.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    Ok(match resolve_predefined_entity(name) {
        Some(resolved) => resolved.to_string(),
        None => format!("&{name};"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld name="Intro">
    <p:spTree>
      <p:sp>
        <p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
        <p:txBody><a:p><a:r><a:rPr sz="4400"/><a:t>Fish &amp; Chips</a:t></a:r></a:p></p:txBody>
      </p:sp>
    </p:spTree>
  </p:cSld>
</p:sld>"#;

    #[test]
    fn test_local_names_and_attributes() {
        let root = XmlElement::parse(SHAPE).unwrap();
        assert_eq!(root.name(), "sld");
        assert_eq!(root.find("cSld").unwrap().attr("name"), Some("Intro"));
        assert_eq!(root.find("ph").unwrap().attr("type"), Some("title"));
        assert_eq!(root.find("rPr").unwrap().attr_i64("sz"), Some(4400));
    }

    #[test]
    fn test_entities_are_resolved() {
        let root = XmlElement::parse(SHAPE).unwrap();
        assert_eq!(root.find("t").unwrap().text(), "Fish & Chips");
    }

    #[test]
    fn test_prefix_independent() {
        let unprefixed = r#"<sld><cSld><spTree><sp><txBody><p><r><t>Hi</t></r></p></txBody></sp></spTree></cSld></sld>"#;
        let root = XmlElement::parse(unprefixed).unwrap();
        assert_eq!(root.find_all("t").len(), 1);
        assert!(root.contains_any(&["sp"]));
        assert!(!root.contains_any(&["pic", "tbl"]));
    }

    #[test]
    fn test_numeric_and_unknown_entities() {
        let root = XmlElement::parse("<t>caf&#233; &#x41; &bogus; ok</t>").unwrap();
        assert_eq!(root.text(), "café A &bogus; ok");

        let root = XmlElement::parse(r#"<latin typeface="Fish &amp; Chips &#x41;"/>"#).unwrap();
        assert_eq!(root.attr("typeface"), Some("Fish & Chips A"));
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let nested = |depth: usize| format!("{}{}", "<x>".repeat(depth), "</x>".repeat(depth));
        assert!(XmlElement::parse(&nested(MAX_DEPTH)).is_ok());

        let err = XmlElement::parse(&nested(200_000)).unwrap_err();
        assert!(err.to_string().contains("nesting"));
    }

    #[test]
    fn test_malformed_documents_fail() {
        assert!(XmlElement::parse("<a><b></a>").is_err());
        assert!(XmlElement::parse("<a><b>").is_err());
        assert!(XmlElement::parse("   ").is_err());
    }
}
