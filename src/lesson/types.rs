//! Records produced by lesson analysis.
//!
//! Field names serialize in camelCase so that the JSON handed to the lesson
//! generator keeps the shape it expects (`totalSlides`, `lessonFlow`,
//! `designSystem`, ...).
use crate::common::error::Result;
use crate::lesson::classifier::Strategy;
use crate::ooxml::pptx::LayoutHint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Activity label given to slides no strategy could classify.
pub const DEFAULT_ACTIVITY: &str = "Content Slide";

/// Content label given to slides the content table does not match.
pub const DEFAULT_CONTENT: &str = "Main Content";

/// Title recorded for slides that could not be parsed.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// The only assessment method reported.
pub const FORMATIVE_ASSESSMENT: &str = "Formative Assessment";

/// Visual layout of a slide.
///
/// Serializes as its [`label`](Layout::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Layout {
    TitleSlide,
    TextHeavy,
    MixedContent,
    VisualFocused,
    StandardLayout,
    BulletPoints,
    TableLayout,
}

impl Layout {
    /// Every layout, in declaration order.
    pub const ALL: [Layout; 7] = [
        Layout::TitleSlide,
        Layout::TextHeavy,
        Layout::MixedContent,
        Layout::VisualFocused,
        Layout::StandardLayout,
        Layout::BulletPoints,
        Layout::TableLayout,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Layout::TitleSlide => "Title Slide",
            Layout::TextHeavy => "Text Heavy",
            Layout::MixedContent => "Mixed Content",
            Layout::VisualFocused => "Visual Focused",
            Layout::StandardLayout => "Standard Layout",
            Layout::BulletPoints => "Bullet Points",
            Layout::TableLayout => "Table Layout",
        }
    }
}

impl From<Layout> for &'static str {
    fn from(layout: Layout) -> Self {
        layout.label()
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.label() == s)
            .ok_or_else(|| format!("unknown layout `{s}`"))
    }
}

impl TryFrom<String> for Layout {
    type Error = String;

    fn try_from(label: String) -> std::result::Result<Self, Self::Error> {
        label.parse()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vertical position of the title on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitlePosition {
    Top,
    Center,
    Bottom,
    None,
}

/// How many visual elements compete on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentLayout {
    TextOnly,
    SingleFocus,
    MultiElement,
}

/// Horizontal placement of the first picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageAlignment {
    None,
    Left,
    Center,
    Right,
}

/// Visual design characteristics of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPatterns {
    pub title_position: TitlePosition,
    pub content_layout: ContentLayout,
    pub image_alignment: ImageAlignment,
    /// `#RRGGBB` values in first-seen order
    pub color_scheme: Vec<String>,
    /// Font families in first-seen order
    pub font_hierarchy: Vec<String>,
}

impl Default for DesignPatterns {
    fn default() -> Self {
        Self {
            title_position: TitlePosition::None,
            content_layout: ContentLayout::TextOnly,
            image_alignment: ImageAlignment::None,
            color_scheme: Vec::new(),
            font_hierarchy: Vec::new(),
        }
    }
}

/// A classified slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideAnalysis {
    /// 1-based position in the deck
    pub slide_index: usize,
    pub title: String,
    pub layout: Layout,
    pub design_patterns: DesignPatterns,
    pub activity_type: String,
    pub content_type: String,
    /// Which classifier strategy produced `activity_type`
    pub activity_source: Strategy,
    pub text_run_count: usize,
    pub word_count: usize,
    pub has_images: bool,
    pub has_table: bool,
    pub has_bullets: bool,
    pub layout_hints: Vec<LayoutHint>,
    /// `#RRGGBB`
    pub background_color: String,
    /// Corner positions of small pictures, e.g. `top-right`
    pub logo_positions: Vec<String>,
    /// `full-bleed`, `half-width` or `inline` per picture, distinct
    pub image_styles: Vec<String>,
    /// Set when the slide could not be parsed and this is a placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl SlideAnalysis {
    /// Neutral entry for a slide whose part could not be parsed.
    pub fn placeholder(slide_index: usize, reason: impl Into<String>) -> Self {
        Self {
            slide_index,
            title: UNKNOWN_TITLE.to_string(),
            layout: Layout::StandardLayout,
            design_patterns: DesignPatterns::default(),
            activity_type: DEFAULT_ACTIVITY.to_string(),
            content_type: DEFAULT_CONTENT.to_string(),
            activity_source: Strategy::Default,
            text_run_count: 0,
            word_count: 0,
            has_images: false,
            has_table: false,
            has_bullets: false,
            layout_hints: Vec::new(),
            background_color: crate::common::RGBColor::WHITE.to_string(),
            logo_positions: Vec::new(),
            image_styles: Vec::new(),
            parse_error: Some(reason.into()),
        }
    }

    /// Whether this entry stands in for an unparseable slide.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.parse_error.is_some()
    }
}

/// Colors, fonts and image treatment of one presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystem {
    pub primary_colors: Vec<String>,
    pub secondary_colors: Vec<String>,
    pub font_families: Vec<String>,
    pub logo_positions: Vec<String>,
    pub image_styles: Vec<String>,
}

/// Pedagogical shape of one lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedagogicalPatterns {
    pub introduction_style: String,
    pub content_progression: Vec<String>,
    /// Distinct activity types, first-seen order
    pub activity_types: Vec<String>,
    pub assessment_methods: Vec<String>,
    pub conclusion_style: String,
}

/// Analysis of one presentation file.
///
/// `total_slides == lesson_flow.len() == sum(common_layouts.values())`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStructure {
    pub total_slides: usize,
    pub lesson_flow: Vec<String>,
    pub common_layouts: BTreeMap<Layout, usize>,
    pub design_system: DesignSystem,
    pub pedagogical_patterns: PedagogicalPatterns,
    pub slides: Vec<SlideAnalysis>,
}

impl LessonStructure {
    /// Whether the slide counts agree with each other.
    pub fn is_consistent(&self) -> bool {
        self.total_slides == self.lesson_flow.len()
            && self.total_slides == self.common_layouts.values().sum::<usize>()
            && self.total_slides == self.slides.len()
    }

    /// Number of slides replaced by placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.slides.iter().filter(|s| s.is_placeholder()).count()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Counters over the whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusOverview {
    pub total_lessons: usize,
    pub total_slides: usize,
    pub average_slides_per_lesson: usize,
}

/// Design system merged across lessons, ranked by frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusDesignSystem {
    pub fonts: Vec<String>,
    pub primary_colors: Vec<String>,
    pub secondary_colors: Vec<String>,
}

/// Share of all slides using one layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutUsage {
    pub layout: Layout,
    /// Rounded percentage of all slides
    pub percentage: u32,
    pub count: usize,
}

/// How lessons usually open and close.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFlow {
    pub opening: Option<String>,
    pub closing: Option<String>,
}

/// Teaching patterns merged across lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedagogicalInsights {
    pub activity_types: Vec<String>,
    pub layout_usage: Vec<LayoutUsage>,
    pub teaching_style: String,
    pub assessment_approach: String,
    pub common_flow: CommonFlow,
}

/// Cross-file summary used as a style profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSummary {
    pub overview: CorpusOverview,
    pub design_system: CorpusDesignSystem,
    pub pedagogical_insights: PedagogicalInsights,
    pub visual_patterns: Vec<String>,
}

impl CorpusSummary {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Push `value` unless already present.
pub(crate) fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_serializes_as_label() {
        for layout in Layout::ALL {
            let json = serde_json::to_string(&layout).unwrap();
            assert_eq!(json, format!("\"{}\"", layout.label()));
            assert_eq!(serde_json::from_str::<Layout>(&json).unwrap(), layout);
            assert_eq!(layout.to_string().parse::<Layout>(), Ok(layout));
        }
        assert!(serde_json::from_str::<Layout>("\"TitleSlide\"").is_err());
        assert!("Title slide".parse::<Layout>().is_err());
    }

    #[test]
    fn test_design_pattern_enums_are_kebab() {
        assert_eq!(
            serde_json::to_string(&ContentLayout::SingleFocus).unwrap(),
            "\"single-focus\""
        );
        assert_eq!(serde_json::to_string(&TitlePosition::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_placeholder_is_neutral() {
        let slide = SlideAnalysis::placeholder(4, "bad xml");
        assert_eq!(slide.title, UNKNOWN_TITLE);
        assert_eq!(slide.layout, Layout::StandardLayout);
        assert_eq!(slide.activity_type, DEFAULT_ACTIVITY);
        assert!(slide.is_placeholder());
    }

    #[test]
    fn test_lesson_json_field_names() {
        let mut common_layouts = BTreeMap::new();
        common_layouts.insert(Layout::StandardLayout, 1);
        let lesson = LessonStructure {
            total_slides: 1,
            lesson_flow: vec![DEFAULT_ACTIVITY.to_string()],
            common_layouts,
            design_system: DesignSystem::default(),
            pedagogical_patterns: PedagogicalPatterns::default(),
            slides: vec![SlideAnalysis::placeholder(1, "x")],
        };
        assert!(lesson.is_consistent());
        let value: serde_json::Value = serde_json::from_str(&lesson.to_json().unwrap()).unwrap();
        assert_eq!(value["totalSlides"], 1);
        assert_eq!(value["commonLayouts"]["Standard Layout"], 1);
        assert!(value["designSystem"]["primaryColors"].is_array());
        assert!(value["pedagogicalPatterns"]["assessmentMethods"].is_array());
        assert_eq!(value["slides"][0]["parseError"], "x");

        let back: LessonStructure = serde_json::from_value(value).unwrap();
        assert_eq!(back, lesson);
    }
}
