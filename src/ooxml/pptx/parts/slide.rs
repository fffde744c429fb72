/// Slide parts.
///
/// A [`SlidePart`] turns the XML of `ppt/slides/slideN.xml` into a
/// [`SlideContent`]: ordered text runs with their formatting, the detected
/// title, structural flags and the slide's colors and fonts.
use crate::common::style::{RGBColor, Rect};
use crate::config::AnalyzerConfig;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::backgrounds::resolve_background_color;
use crate::ooxml::pptx::content::{LayoutHint, PlaceholderKind, RawTextRun, SlideContent};
use crate::ooxml::xml::XmlElement;
use tracing::debug;

/// Elements that carry run properties for the text below them.
const RUN_ELEMENTS: &[&str] = &["r", "fld"];

/// Bullet character and auto-numbering markers.
const BULLET_ELEMENTS: &[&str] = &["buChar", "buAutoNum"];

/// Elements that start a new shape on the slide tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Shape,
    Picture,
    GraphicFrame,
    Connector,
}

impl ShapeKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sp" => Some(ShapeKind::Shape),
            "pic" => Some(ShapeKind::Picture),
            "graphicFrame" => Some(ShapeKind::GraphicFrame),
            "cxnSp" => Some(ShapeKind::Connector),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct ShapeInfo<'x> {
    kind: ShapeKind,
    placeholder: Option<PlaceholderKind>,
    frame: Option<Rect>,
    element: &'x XmlElement,
}

/// A run together with the shape it was found in.
#[derive(Debug)]
struct LocatedRun {
    run: RawTextRun,
    shape: Option<usize>,
}

#[derive(Debug, Default)]
struct Collector<'x> {
    shapes: Vec<ShapeInfo<'x>>,
    runs: Vec<LocatedRun>,
}

/// How the title of a slide was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// A `title` / `ctrTitle` placeholder
    Placeholder,
    /// Largest, highest run in a positioned shape
    LargestPositionedRun,
    /// First short run in document order
    FirstShortRun,
    /// No title
    None,
}

#[derive(Debug)]
struct TitleChoice {
    text: String,
    source: TitleSource,
    shape: Option<usize>,
}

/// A slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package. The layout the
/// slide references may be attached so that an inherited background can be
/// resolved.
#[derive(Debug, Clone, Copy)]
pub struct SlidePart<'a> {
    name: &'a str,
    xml: &'a str,
    layout_xml: Option<&'a str>,
}

impl<'a> SlidePart<'a> {
    /// Create a slide part from its name and XML text.
    pub fn new(name: &'a str, xml: &'a str) -> Self {
        Self {
            name,
            xml,
            layout_xml: None,
        }
    }

    /// Attach the XML of the slide's layout part.
    pub fn with_layout(mut self, layout_xml: Option<&'a str>) -> Self {
        self.layout_xml = layout_xml;
        self
    }

    /// Part name, e.g. `ppt/slides/slide1.xml`.
    #[inline]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Parse the slide and extract its content.
    ///
    /// A malformed slide document is reported as
    /// [`OoxmlError::SlidePartParse`]. A malformed layout is ignored and the
    /// background falls back to white.
    pub fn extract(&self, slide_index: usize, config: &AnalyzerConfig) -> Result<SlideContent> {
        let root = XmlElement::parse(self.xml).map_err(|e| OoxmlError::SlidePartParse {
            part: self.name.to_string(),
            reason: e.to_string(),
        })?;

        let layout = self.layout_xml.and_then(|xml| match XmlElement::parse(xml) {
            Ok(layout) => Some(layout),
            Err(e) => {
                debug!(part = self.name, error = %e, "ignoring unreadable slide layout");
                None
            },
        });

        let mut collector = Collector::default();
        collect(&root, None, None, &mut collector);

        let title = choose_title(&collector, config);
        debug!(part = self.name, source = ?title.source, "slide title resolved");
        let title_shape = title.shape.map(|idx| &collector.shapes[idx]);

        let all_text = collector
            .runs
            .iter()
            .map(|located| located.run.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let has_images = root.contains_any(&["pic", "blip"]);
        let has_table = root.contains_any(&["tbl"]);
        let bullet_count = root
            .descendants()
            .into_iter()
            .filter(|e| BULLET_ELEMENTS.contains(&e.name()))
            .count();
        let has_bullets = bullet_count > 0;
        let run_count = collector.runs.len();

        let mut layout_hints = Vec::new();
        if has_images {
            layout_hints.push(LayoutHint::Images);
        }
        if has_bullets {
            layout_hints.push(LayoutHint::Bullets);
        }
        if has_table {
            layout_hints.push(LayoutHint::Table);
        }
        if run_count > config.text_heavy_threshold {
            layout_hints.push(LayoutHint::TextHeavy);
        }

        let pictures = collector
            .shapes
            .iter()
            .filter(|shape| shape.kind == ShapeKind::Picture)
            .filter_map(|shape| shape.frame)
            .collect();

        Ok(SlideContent {
            slide_index,
            title: title.text,
            all_text,
            text_runs: collector.runs.into_iter().map(|located| located.run).collect(),
            has_images,
            has_table,
            has_bullets,
            bullet_count,
            layout_hints,
            background_color: resolve_background_color(&root, layout.as_ref()).to_string(),
            colors: slide_colors(&root),
            fonts: slide_fonts(&root),
            title_placeholder: title_shape.and_then(|shape| shape.placeholder),
            title_frame: title_shape.and_then(|shape| shape.frame),
            pictures,
        })
    }
}

/// Walk the tree, recording shapes and text runs in document order.
fn collect<'x>(
    element: &'x XmlElement,
    shape: Option<usize>,
    run: Option<&'x XmlElement>,
    acc: &mut Collector<'x>,
) {
    let mut shape = shape;
    let mut run = run;

    if let Some(kind) = ShapeKind::from_name(element.name()) {
        acc.shapes.push(ShapeInfo {
            kind,
            placeholder: placeholder_of(element),
            frame: frame_of(element),
            element,
        });
        shape = Some(acc.shapes.len() - 1);
    } else if RUN_ELEMENTS.contains(&element.name()) {
        run = Some(element);
    } else if element.is("t") {
        let text = element.text();
        let trimmed = text.trim();
        if trimmed.chars().count() > 1 {
            acc.runs.push(LocatedRun {
                run: text_run(trimmed, run),
                shape,
            });
        }
        return;
    }

    for child in element.children() {
        collect(child, shape, run, acc);
    }
}

/// Build a run from its text and the properties of the enclosing `<a:r>`.
fn text_run(text: &str, run: Option<&XmlElement>) -> RawTextRun {
    let props = run.and_then(|r| r.child("rPr"));

    let font_size_pt = props
        .and_then(|p| p.attr_i64("sz"))
        .filter(|sz| *sz > 0)
        .map(|sz| sz as f64 / 100.0);
    let font_family = props
        .and_then(|p| p.child("latin"))
        .and_then(|latin| latin.attr("typeface"))
        .filter(|face| !face.is_empty())
        .map(str::to_string);
    let color = props
        .and_then(|p| p.child("solidFill"))
        .and_then(|fill| fill.child("srgbClr"))
        .and_then(|clr| clr.attr("val"))
        .and_then(RGBColor::from_hex)
        .map(|c| c.to_string());

    RawTextRun::new(text, font_size_pt, font_family, color)
}

/// `<p:nvXxPr><p:nvPr><p:ph type>` of a shape, when it is a title placeholder.
fn placeholder_of(shape: &XmlElement) -> Option<PlaceholderKind> {
    shape
        .children()
        .filter(|child| child.name().starts_with("nv"))
        .find_map(|nv| nv.child("nvPr"))
        .and_then(|nv_pr| nv_pr.child("ph"))
        .and_then(|ph| ph.attr("type"))
        .and_then(PlaceholderKind::from_ph_type)
}

/// Shape transform: `<p:spPr><a:xfrm>` or, for graphic frames, `<p:xfrm>`.
fn frame_of(shape: &XmlElement) -> Option<Rect> {
    let xfrm = shape
        .child("spPr")
        .and_then(|sp_pr| sp_pr.child("xfrm"))
        .or_else(|| shape.child("xfrm"))?;
    let off = xfrm.child("off")?;
    let ext = xfrm.child("ext");

    Some(Rect {
        x: off.attr_i64("x").unwrap_or(0),
        y: off.attr_i64("y").unwrap_or(0),
        cx: ext.and_then(|e| e.attr_i64("cx")).unwrap_or(0),
        cy: ext.and_then(|e| e.attr_i64("cy")).unwrap_or(0),
    })
}

/// Apply the title strategies in order.
fn choose_title(acc: &Collector<'_>, config: &AnalyzerConfig) -> TitleChoice {
    // 1. Title placeholder: joined text of its body.
    for (idx, shape) in acc.shapes.iter().enumerate() {
        if shape.placeholder.is_none() {
            continue;
        }
        let text = placeholder_text(shape.element);
        if !text.is_empty() {
            return TitleChoice {
                text,
                source: TitleSource::Placeholder,
                shape: Some(idx),
            };
        }
    }

    // 2. Largest run in a positioned `<p:sp>`, higher on the slide wins ties.
    let mut candidates: Vec<(&LocatedRun, usize, i64)> = acc
        .runs
        .iter()
        .filter_map(|located| {
            let idx = located.shape?;
            let shape = &acc.shapes[idx];
            if shape.kind != ShapeKind::Shape {
                return None;
            }
            shape.frame.map(|frame| (located, idx, frame.y))
        })
        .collect();
    candidates.sort_by(|(a, _, ay), (b, _, by)| {
        b.run
            .effective_size_pt()
            .total_cmp(&a.run.effective_size_pt())
            .then_with(|| ay.cmp(by))
    });
    if let Some((located, idx, _)) = candidates.first() {
        return TitleChoice {
            text: located.run.text.clone(),
            source: TitleSource::LargestPositionedRun,
            shape: Some(*idx),
        };
    }

    // 3. First short run anywhere.
    if let Some(located) = acc
        .runs
        .iter()
        .find(|located| located.run.text.chars().count() < config.title_max_chars)
    {
        return TitleChoice {
            text: located.run.text.clone(),
            source: TitleSource::FirstShortRun,
            shape: located.shape,
        };
    }

    TitleChoice {
        text: String::new(),
        source: TitleSource::None,
        shape: None,
    }
}

/// Text of a shape's `<p:txBody>`, one space between pieces.
fn placeholder_text(shape: &XmlElement) -> String {
    let Some(body) = shape.child("txBody") else {
        return String::new();
    };
    body.find_all("t")
        .into_iter()
        .map(|t| t.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every valid `srgbClr` in the slide, first-seen order.
fn slide_colors(root: &XmlElement) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for clr in root.find_all("srgbClr") {
        if let Some(color) = clr.attr("val").and_then(RGBColor::from_hex) {
            let hex = color.to_string();
            if !colors.contains(&hex) {
                colors.push(hex);
            }
        }
    }
    colors
}

/// Explicit latin typefaces, skipping theme references such as `+mj-lt`.
fn slide_fonts(root: &XmlElement) -> Vec<String> {
    let mut fonts: Vec<String> = Vec::new();
    for latin in root.find_all("latin") {
        let Some(face) = latin.attr("typeface").map(str::trim) else {
            continue;
        };
        if face.is_empty() || face.starts_with('+') {
            continue;
        }
        if !fonts.iter().any(|f| f == face) {
            fonts.push(face.to_string());
        }
    }
    fonts
}
