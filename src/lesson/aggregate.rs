//! Folding classified slides into one [`LessonStructure`].
use crate::common::error::{Error, Result};
use crate::config::AnalyzerConfig;
use crate::lesson::classifier::classify;
use crate::lesson::layout::{classify_layout, design_patterns, image_styles, logo_positions};
use crate::lesson::types::{
    DEFAULT_ACTIVITY, DEFAULT_CONTENT, DesignSystem, FORMATIVE_ASSESSMENT, LessonStructure,
    PedagogicalPatterns, SlideAnalysis, push_distinct,
};
use crate::ooxml::pptx::{SlideContent, SlideSize};
use std::collections::BTreeMap;
use tracing::warn;

/// Distinct colors per design-system color group.
const COLORS_PER_GROUP: usize = 3;

/// Distinct font families kept per lesson.
const MAX_FONT_FAMILIES: usize = 3;

/// Classify one extracted slide.
pub fn analyze_slide(content: &SlideContent, size: SlideSize, config: &AnalyzerConfig) -> SlideAnalysis {
    let classification = classify(content, config);

    SlideAnalysis {
        slide_index: content.slide_index,
        title: content.title.clone(),
        layout: classify_layout(content, config),
        design_patterns: design_patterns(content, size),
        activity_type: classification.activity_type,
        content_type: classification.content_type,
        activity_source: classification.strategy,
        text_run_count: content.text_run_count(),
        word_count: content.word_count(),
        has_images: content.has_images,
        has_table: content.has_table,
        has_bullets: content.has_bullets,
        layout_hints: content.layout_hints.clone(),
        background_color: content.background_color.clone(),
        logo_positions: logo_positions(&content.pictures, size),
        image_styles: image_styles(&content.pictures, size),
        parse_error: None,
    }
}

/// Collects the slides of one presentation and builds its [`LessonStructure`].
///
/// Slides may be pushed in any order; they are sorted by index when the
/// structure is built.
///
/// # Examples
///
/// ```rust
/// use lesson_lens::config::AnalyzerConfig;
/// use lesson_lens::lesson::aggregate::SlideAggregator;
///
/// let config = AnalyzerConfig::default();
/// let mut aggregator = SlideAggregator::new(&config);
/// aggregator.push_failure(1, "unexpected end of document");
/// assert!(aggregator.finish().is_err());
/// ```
#[derive(Debug)]
pub struct SlideAggregator<'c> {
    config: &'c AnalyzerConfig,
    slides: Vec<SlideAnalysis>,
    theme_colors: Vec<String>,
    theme_fonts: Vec<String>,
}

impl<'c> SlideAggregator<'c> {
    pub fn new(config: &'c AnalyzerConfig) -> Self {
        Self {
            config,
            slides: Vec::new(),
            theme_colors: Vec::new(),
            theme_fonts: Vec::new(),
        }
    }

    /// Colors used to top up a sparse per-slide palette, `#RRGGBB`.
    pub fn with_theme_colors(mut self, colors: Vec<String>) -> Self {
        self.theme_colors = colors;
        self
    }

    /// Font families reported when no slide names one of its own.
    pub fn with_theme_fonts(mut self, fonts: Vec<String>) -> Self {
        self.theme_fonts = fonts;
        self
    }

    /// Add a classified slide.
    pub fn push(&mut self, slide: SlideAnalysis) {
        self.slides.push(slide);
    }

    /// Add a placeholder for a slide that could not be parsed.
    pub fn push_failure(&mut self, slide_index: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(slide = slide_index, %reason, "slide replaced by placeholder");
        self.slides.push(SlideAnalysis::placeholder(slide_index, reason));
    }

    /// Number of slides collected so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Build the lesson structure.
    ///
    /// Fails with [`Error::NoSlidesRecovered`] when no slide was collected or
    /// every collected slide is a placeholder.
    pub fn finish(mut self) -> Result<LessonStructure> {
        let attempted = self.slides.len();
        if self.slides.iter().all(SlideAnalysis::is_placeholder) {
            return Err(Error::NoSlidesRecovered { attempted });
        }

        self.slides.sort_by_key(|slide| slide.slide_index);

        let mut common_layouts = BTreeMap::new();
        for slide in &self.slides {
            *common_layouts.entry(slide.layout).or_insert(0) += 1;
        }

        let lesson_flow: Vec<String> = self
            .slides
            .iter()
            .map(|slide| slide.activity_type.clone())
            .collect();

        Ok(LessonStructure {
            total_slides: self.slides.len(),
            lesson_flow,
            common_layouts,
            design_system: self.design_system(),
            pedagogical_patterns: self.pedagogical_patterns(),
            slides: self.slides,
        })
    }

    fn design_system(&self) -> DesignSystem {
        let mut colors: Vec<String> = Vec::new();
        let mut fonts: Vec<String> = Vec::new();
        let mut logos: Vec<String> = Vec::new();
        let mut styles: Vec<String> = Vec::new();

        for slide in &self.slides {
            for color in &slide.design_patterns.color_scheme {
                push_distinct(&mut colors, color);
            }
            for font in &slide.design_patterns.font_hierarchy {
                push_distinct(&mut fonts, font);
            }
            for position in &slide.logo_positions {
                push_distinct(&mut logos, position);
            }
            for style in &slide.image_styles {
                push_distinct(&mut styles, style);
            }
        }

        if colors.len() < self.config.theme_fallback_min_colors {
            for color in &self.theme_colors {
                push_distinct(&mut colors, color);
            }
        }

        if fonts.is_empty() {
            fonts = self.theme_fonts.clone();
        }

        let secondary_colors = colors
            .iter()
            .skip(COLORS_PER_GROUP)
            .take(COLORS_PER_GROUP)
            .cloned()
            .collect();
        colors.truncate(COLORS_PER_GROUP);
        fonts.truncate(MAX_FONT_FAMILIES);

        DesignSystem {
            primary_colors: colors,
            secondary_colors,
            font_families: fonts,
            logo_positions: logos,
            image_styles: styles,
        }
    }

    fn pedagogical_patterns(&self) -> PedagogicalPatterns {
        let last = self.slides.len().saturating_sub(1);
        let content_progression: Vec<String> = self
            .slides
            .iter()
            .enumerate()
            .map(|(i, slide)| progression_label(slide, i, last).to_string())
            .collect();

        let mut activity_types: Vec<String> = Vec::new();
        for slide in &self.slides {
            if slide.activity_type != DEFAULT_ACTIVITY {
                push_distinct(&mut activity_types, &slide.activity_type);
            }
        }

        PedagogicalPatterns {
            introduction_style: content_progression.first().cloned().unwrap_or_default(),
            conclusion_style: content_progression.last().cloned().unwrap_or_default(),
            content_progression,
            activity_types,
            assessment_methods: vec![FORMATIVE_ASSESSMENT.to_string()],
        }
    }
}

/// Label of one slide in the lesson's content progression.
fn progression_label(slide: &SlideAnalysis, position: usize, last: usize) -> &str {
    if slide.activity_type != DEFAULT_ACTIVITY {
        &slide.activity_type
    } else if slide.content_type != DEFAULT_CONTENT {
        &slide.content_type
    } else if position == 0 {
        "Introduction"
    } else if position == last {
        "Conclusion"
    } else {
        "Content Development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::types::Layout;

    fn slide(index: usize, activity: &str, content: &str, layout: Layout) -> SlideAnalysis {
        let mut slide = SlideAnalysis::placeholder(index, "");
        slide.parse_error = None;
        slide.title = format!("Slide {index}");
        slide.activity_type = activity.to_string();
        slide.content_type = content.to_string();
        slide.layout = layout;
        slide
    }

    #[test]
    fn test_counts_agree_and_order_is_restored() {
        let config = AnalyzerConfig::default();
        let mut aggregator = SlideAggregator::new(&config);
        aggregator.push(slide(3, "Homework Assignment", DEFAULT_CONTENT, Layout::BulletPoints));
        aggregator.push(slide(1, "Introduction", "Introduction", Layout::TitleSlide));
        aggregator.push_failure(2, "malformed");

        let lesson = aggregator.finish().unwrap();
        assert!(lesson.is_consistent());
        assert_eq!(lesson.total_slides, 3);
        assert_eq!(
            lesson.lesson_flow,
            vec!["Introduction", DEFAULT_ACTIVITY, "Homework Assignment"]
        );
        assert_eq!(lesson.common_layouts[&Layout::StandardLayout], 1);
        assert_eq!(lesson.placeholder_count(), 1);
        assert_eq!(lesson.slides[1].title, "Unknown");
    }

    #[test]
    fn test_progression_and_activity_types() {
        let config = AnalyzerConfig::default();
        let mut aggregator = SlideAggregator::new(&config);
        aggregator.push(slide(1, DEFAULT_ACTIVITY, DEFAULT_CONTENT, Layout::TitleSlide));
        aggregator.push(slide(2, DEFAULT_ACTIVITY, "Grammar Point", Layout::StandardLayout));
        aggregator.push(slide(3, DEFAULT_ACTIVITY, DEFAULT_CONTENT, Layout::StandardLayout));
        aggregator.push(slide(4, "Role Play", DEFAULT_CONTENT, Layout::StandardLayout));
        aggregator.push(slide(5, DEFAULT_ACTIVITY, DEFAULT_CONTENT, Layout::StandardLayout));

        let patterns = aggregator.finish().unwrap().pedagogical_patterns;
        assert_eq!(
            patterns.content_progression,
            vec![
                "Introduction",
                "Grammar Point",
                "Content Development",
                "Role Play",
                "Conclusion"
            ]
        );
        assert_eq!(patterns.activity_types, vec!["Role Play"]);
        assert_eq!(patterns.assessment_methods, vec![FORMATIVE_ASSESSMENT]);
        assert_eq!(patterns.introduction_style, "Introduction");
        assert_eq!(patterns.conclusion_style, "Conclusion");
    }

    #[test]
    fn test_colors_split_and_theme_fallback() {
        let config = AnalyzerConfig::default();
        let mut first = slide(1, "Introduction", DEFAULT_CONTENT, Layout::TitleSlide);
        first.design_patterns.color_scheme = vec!["#111111".into(), "#222222".into()];
        first.design_patterns.font_hierarchy = vec!["Arial".into()];
        let mut second = slide(2, "Introduction", DEFAULT_CONTENT, Layout::StandardLayout);
        second.design_patterns.color_scheme = vec!["#222222".into(), "#333333".into()];
        second.design_patterns.font_hierarchy = vec!["Arial".into(), "Georgia".into()];

        let mut aggregator = SlideAggregator::new(&config).with_theme_colors(vec![
            "#111111".into(),
            "#4472C4".into(),
            "#ED7D31".into(),
            "#A5A5A5".into(),
        ]);
        aggregator.push(first);
        aggregator.push(second);

        let design = aggregator.finish().unwrap().design_system;
        assert_eq!(design.primary_colors, vec!["#111111", "#222222", "#333333"]);
        assert_eq!(design.secondary_colors, vec!["#4472C4", "#ED7D31", "#A5A5A5"]);
        assert_eq!(design.font_families, vec!["Arial", "Georgia"]);
    }

    #[test]
    fn test_theme_fonts_fill_an_empty_font_list() {
        let config = AnalyzerConfig::default();
        let theme_fonts = vec!["Calibri Light".to_string(), "Calibri".to_string()];

        let mut aggregator = SlideAggregator::new(&config).with_theme_fonts(theme_fonts.clone());
        aggregator.push(slide(1, "Introduction", DEFAULT_CONTENT, Layout::TitleSlide));
        let design = aggregator.finish().unwrap().design_system;
        assert_eq!(design.font_families, theme_fonts);

        let mut declared = slide(1, "Introduction", DEFAULT_CONTENT, Layout::TitleSlide);
        declared.design_patterns.font_hierarchy = vec!["Georgia".into()];
        let mut aggregator = SlideAggregator::new(&config).with_theme_fonts(theme_fonts);
        aggregator.push(declared);
        let design = aggregator.finish().unwrap().design_system;
        assert_eq!(design.font_families, vec!["Georgia"]);
    }

    #[test]
    fn test_all_placeholders_is_an_error() {
        let config = AnalyzerConfig::default();
        let mut aggregator = SlideAggregator::new(&config);
        aggregator.push_failure(1, "bad");
        aggregator.push_failure(2, "bad");
        assert!(matches!(
            aggregator.finish(),
            Err(Error::NoSlidesRecovered { attempted: 2 })
        ));

        assert!(matches!(
            SlideAggregator::new(&config).finish(),
            Err(Error::NoSlidesRecovered { attempted: 0 })
        ));
    }
}
