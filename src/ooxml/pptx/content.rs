//! Extraction results for a single slide.
//!
//! [`SlideContent`] is what the slide extractor produces and what the
//! classifier and layout analysis consume. It is built once per slide and
//! never mutated afterwards.
use crate::common::style::Rect;
use serde::{Deserialize, Serialize};

/// Font size assumed for runs whose properties carry no `sz`.
pub const DEFAULT_FONT_SIZE_PT: f64 = 12.0;

/// Font family reported for runs whose properties carry no typeface.
pub const DEFAULT_FONT_FAMILY: &str = "Default";

/// Runs at or above this size are ranked as titles.
const TITLE_RANK_MIN_PT: f64 = 28.0;

/// Runs at or above this size (and below the title size) are ranked as subtitles.
const SUBTITLE_RANK_MIN_PT: f64 = 20.0;

/// One piece of text from a `<a:t>` leaf with the formatting of its run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextRun {
    pub text: String,
    /// Size in points as declared by the run (`sz` is stored in 1/100 pt).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f64>,
    /// Latin typeface declared by the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// 1 = likely title, 2 = subtitle, 3 = body.
    pub hierarchy_rank: u8,
    /// Solid fill color of the run, `#RRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RawTextRun {
    /// Create a run, deriving its hierarchy rank from the effective size.
    pub fn new(
        text: impl Into<String>,
        font_size_pt: Option<f64>,
        font_family: Option<String>,
        color: Option<String>,
    ) -> Self {
        let size = font_size_pt.unwrap_or(DEFAULT_FONT_SIZE_PT);
        Self {
            text: text.into(),
            font_size_pt,
            font_family,
            hierarchy_rank: hierarchy_rank(size),
            color,
        }
    }

    /// Declared size, or 12pt.
    #[inline]
    pub fn effective_size_pt(&self) -> f64 {
        self.font_size_pt.unwrap_or(DEFAULT_FONT_SIZE_PT)
    }

    /// Declared family, or the generic default.
    #[inline]
    pub fn effective_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }
}

/// Rank a font size: 1 (title), 2 (subtitle) or 3 (body).
pub fn hierarchy_rank(size_pt: f64) -> u8 {
    if size_pt >= TITLE_RANK_MIN_PT {
        1
    } else if size_pt >= SUBTITLE_RANK_MIN_PT {
        2
    } else {
        3
    }
}

/// Structural hints about a slide's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutHint {
    Images,
    Bullets,
    Table,
    TextHeavy,
}

/// Title placeholder kinds (`<p:ph type="...">`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `type="title"`
    Title,
    /// `type="ctrTitle"`, the centered title of a title slide
    CenterTitle,
}

impl PlaceholderKind {
    /// Parse the `type` attribute of `<p:ph>`.
    pub fn from_ph_type(value: &str) -> Option<Self> {
        match value {
            "title" => Some(PlaceholderKind::Title),
            "ctrTitle" | "centerTitle" | "center-title" => Some(PlaceholderKind::CenterTitle),
            _ => None,
        }
    }
}

/// Everything extracted from one slide part.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideContent {
    /// 1-based position in the deck
    pub slide_index: usize,
    /// Detected title, possibly empty; always drawn from `text_runs`
    pub title: String,
    /// Lowercase, space-joined text of every run
    pub all_text: String,
    pub text_runs: Vec<RawTextRun>,
    pub has_images: bool,
    pub has_table: bool,
    pub has_bullets: bool,
    /// Number of `buChar` / `buAutoNum` nodes
    pub bullet_count: usize,
    /// Ordered set of hints
    pub layout_hints: Vec<LayoutHint>,
    /// Background color, `#RRGGBB`
    pub background_color: String,
    /// Every valid `srgbClr` in the slide, first-seen order, `#RRGGBB`
    pub colors: Vec<String>,
    /// Explicit latin typefaces, first-seen order
    pub fonts: Vec<String>,
    /// Placeholder kind of the shape the title came from
    pub title_placeholder: Option<PlaceholderKind>,
    /// Frame of the shape the title came from, when it declares one
    pub title_frame: Option<Rect>,
    /// Frames of picture shapes
    pub pictures: Vec<Rect>,
}

impl SlideContent {
    /// Number of extracted text runs.
    #[inline]
    pub fn text_run_count(&self) -> usize {
        self.text_runs.len()
    }

    /// Number of whitespace-separated words in `all_text`.
    pub fn word_count(&self) -> usize {
        self.all_text.split_whitespace().count()
    }

    #[inline]
    pub fn has_hint(&self, hint: LayoutHint) -> bool {
        self.layout_hints.contains(&hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_rank_thresholds() {
        assert_eq!(hierarchy_rank(44.0), 1);
        assert_eq!(hierarchy_rank(28.0), 1);
        assert_eq!(hierarchy_rank(24.0), 2);
        assert_eq!(hierarchy_rank(20.0), 2);
        assert_eq!(hierarchy_rank(18.0), 3);
    }

    #[test]
    fn test_run_defaults() {
        let run = RawTextRun::new("Hello", None, None, None);
        assert_eq!(run.effective_size_pt(), DEFAULT_FONT_SIZE_PT);
        assert_eq!(run.effective_family(), DEFAULT_FONT_FAMILY);
        assert_eq!(run.hierarchy_rank, 3);
    }

    #[test]
    fn test_placeholder_kind() {
        assert_eq!(PlaceholderKind::from_ph_type("title"), Some(PlaceholderKind::Title));
        assert_eq!(
            PlaceholderKind::from_ph_type("ctrTitle"),
            Some(PlaceholderKind::CenterTitle)
        );
        assert_eq!(PlaceholderKind::from_ph_type("body"), None);
    }
}
