//! Cross-file aggregation into a [`CorpusSummary`].
//!
//! [`aggregate`] is a pure function of the lessons it is given: the result
//! does not depend on how the lessons were produced, and counts always
//! reflect exactly the lessons passed in.
use crate::common::error::{Error, Result};
use crate::lesson::types::{
    CommonFlow, CorpusDesignSystem, CorpusOverview, CorpusSummary, Layout, LayoutUsage,
    LessonStructure, PedagogicalInsights, push_distinct,
};
use crate::ooxml::pptx::DEFAULT_FONT_FAMILY;
use std::collections::BTreeMap;
use tracing::info;

/// Layouts reported in `layoutUsage`.
const TOP_LAYOUTS: usize = 4;

/// Colors per design-system color group.
const COLORS_PER_GROUP: usize = 3;

/// Fonts at or below this count are reported as consistent typography.
const CONSISTENT_FONT_COUNT: usize = 2;

const TEACHING_STYLE: &str = "Structured, communicative lessons that move from an introduction through guided practice to review";

const ASSESSMENT_APPROACH: &str =
    "Formative assessment through in-class activities, checks for understanding and review";

/// Summarize a corpus of lessons.
///
/// Fails with [`Error::NoAnalyzableInput`] when `lessons` is empty.
///
/// # Examples
///
/// ```rust
/// use lesson_lens::lesson::corpus::aggregate;
///
/// assert!(aggregate(&[]).is_err());
/// ```
pub fn aggregate(lessons: &[LessonStructure]) -> Result<CorpusSummary> {
    if lessons.is_empty() {
        return Err(Error::NoAnalyzableInput { failed: 0 });
    }

    let total_lessons = lessons.len();
    let total_slides: usize = lessons.iter().map(|lesson| lesson.total_slides).sum();
    let average_slides_per_lesson = if total_slides == 0 {
        0
    } else {
        (total_slides as f64 / total_lessons as f64).round() as usize
    };

    let fonts = rank_by_frequency(
        lessons
            .iter()
            .flat_map(|lesson| lesson.design_system.font_families.iter())
            .filter(|font| !is_generic_font(font)),
    );

    let mut colors = rank_by_frequency(lessons.iter().flat_map(|lesson| {
        lesson
            .design_system
            .primary_colors
            .iter()
            .chain(lesson.design_system.secondary_colors.iter())
    }));
    let secondary_colors: Vec<String> = colors
        .iter()
        .skip(COLORS_PER_GROUP)
        .take(COLORS_PER_GROUP)
        .cloned()
        .collect();
    colors.truncate(COLORS_PER_GROUP);

    let mut activity_types: Vec<String> = Vec::new();
    for lesson in lessons {
        for activity in &lesson.pedagogical_patterns.activity_types {
            push_distinct(&mut activity_types, activity);
        }
    }

    let layout_usage = layout_usage(lessons, total_slides);

    let common_flow = CommonFlow {
        opening: most_frequent(lessons.iter().filter_map(|l| l.lesson_flow.first())),
        closing: most_frequent(lessons.iter().filter_map(|l| l.lesson_flow.last())),
    };

    let visual_patterns = visual_patterns(lessons, total_slides, &layout_usage, &fonts);

    info!(total_lessons, total_slides, "corpus aggregated");

    Ok(CorpusSummary {
        overview: CorpusOverview {
            total_lessons,
            total_slides,
            average_slides_per_lesson,
        },
        design_system: CorpusDesignSystem {
            fonts,
            primary_colors: colors,
            secondary_colors,
        },
        pedagogical_insights: PedagogicalInsights {
            activity_types,
            layout_usage,
            teaching_style: TEACHING_STYLE.to_string(),
            assessment_approach: ASSESSMENT_APPROACH.to_string(),
            common_flow,
        },
        visual_patterns,
    })
}

/// Default family and theme font references (`+mj-lt`, `+mn-ea`, ...).
fn is_generic_font(font: &str) -> bool {
    font == DEFAULT_FONT_FAMILY || font.starts_with("+mj-") || font.starts_with("+mn-")
}

/// Distinct values ordered by count, most frequent first; ties keep first-seen order.
fn rank_by_frequency<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut counts: Vec<(&'a String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(value, _)| value.clone()).collect()
}

fn most_frequent<'a>(values: impl Iterator<Item = &'a String>) -> Option<String> {
    rank_by_frequency(values).into_iter().next()
}

/// Layout shares of all slides, top entries by count.
fn layout_usage(lessons: &[LessonStructure], total_slides: usize) -> Vec<LayoutUsage> {
    let mut counts: BTreeMap<Layout, usize> = BTreeMap::new();
    for lesson in lessons {
        for (layout, count) in &lesson.common_layouts {
            *counts.entry(*layout).or_insert(0) += count;
        }
    }

    let mut usage: Vec<LayoutUsage> = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(layout, count)| LayoutUsage {
            layout,
            percentage: percentage(count, total_slides),
            count,
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage.truncate(TOP_LAYOUTS);
    usage
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 * 100.0 / total as f64).round() as u32
}

/// Short observations about the visual style of the corpus.
fn visual_patterns(
    lessons: &[LessonStructure],
    total_slides: usize,
    layout_usage: &[LayoutUsage],
    fonts: &[String],
) -> Vec<String> {
    let mut patterns = Vec::new();
    if total_slides == 0 {
        return patterns;
    }

    if let Some(top) = layout_usage.first() {
        patterns.push(format!(
            "Most slides use the {} layout ({}%)",
            top.layout, top.percentage
        ));
    }

    let with_images = lessons
        .iter()
        .flat_map(|lesson| lesson.slides.iter())
        .filter(|slide| slide.has_images)
        .count();
    patterns.push(format!(
        "Images appear on {}% of slides",
        percentage(with_images, total_slides)
    ));

    match fonts.len() {
        0 => {},
        n if n <= CONSISTENT_FONT_COUNT => {
            patterns.push(format!("Consistent typography using {}", fonts.join(" and ")));
        },
        n => patterns.push(format!("Varied typography across {n} font families")),
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::types::{
        DEFAULT_ACTIVITY, DesignSystem, PedagogicalPatterns, SlideAnalysis,
    };
    use proptest::prelude::*;

    fn lesson(flow: &[&str], layouts: &[(Layout, usize)], fonts: &[&str]) -> LessonStructure {
        let total: usize = layouts.iter().map(|(_, count)| count).sum();
        let slides = (1..=total)
            .map(|i| {
                let mut slide = SlideAnalysis::placeholder(i, "");
                slide.parse_error = None;
                slide
            })
            .collect();
        let mut lesson_flow: Vec<String> = flow.iter().map(|s| s.to_string()).collect();
        lesson_flow.resize(total, DEFAULT_ACTIVITY.to_string());
        LessonStructure {
            total_slides: total,
            lesson_flow,
            common_layouts: layouts.iter().copied().collect(),
            design_system: DesignSystem {
                font_families: fonts.iter().map(|s| s.to_string()).collect(),
                ..DesignSystem::default()
            },
            pedagogical_patterns: PedagogicalPatterns {
                activity_types: flow
                    .iter()
                    .filter(|s| **s != DEFAULT_ACTIVITY)
                    .map(|s| s.to_string())
                    .collect(),
                ..PedagogicalPatterns::default()
            },
            slides,
        }
    }

    #[test]
    fn test_overview_counts() {
        let lessons = vec![
            lesson(&["Introduction"], &[(Layout::StandardLayout, 5)], &["Arial"]),
            lesson(&["Introduction"], &[(Layout::BulletPoints, 8)], &["Arial"]),
            lesson(&["Warm Up Games"], &[(Layout::TitleSlide, 3)], &["Georgia"]),
        ];
        let summary = aggregate(&lessons).unwrap();
        assert_eq!(summary.overview.total_lessons, 3);
        assert_eq!(summary.overview.total_slides, 16);
        assert_eq!(summary.overview.average_slides_per_lesson, 5);
        assert_eq!(summary.design_system.fonts, vec!["Arial", "Georgia"]);
        assert_eq!(
            summary.pedagogical_insights.activity_types,
            vec!["Introduction", "Warm Up Games"]
        );
        assert_eq!(
            summary.pedagogical_insights.common_flow.opening.as_deref(),
            Some("Introduction")
        );
    }

    #[test]
    fn test_layout_usage_top_four() {
        let lessons = vec![lesson(
            &[],
            &[
                (Layout::TitleSlide, 1),
                (Layout::TextHeavy, 2),
                (Layout::MixedContent, 3),
                (Layout::VisualFocused, 4),
                (Layout::BulletPoints, 10),
            ],
            &[],
        )];
        let usage = aggregate(&lessons).unwrap().pedagogical_insights.layout_usage;
        assert_eq!(usage.len(), 4);
        assert_eq!(usage[0].layout, Layout::BulletPoints);
        assert_eq!(usage[0].percentage, 50);
        assert_eq!(usage[3].layout, Layout::TextHeavy);
        assert_eq!(usage[3].percentage, 10);
    }

    #[test]
    fn test_generic_fonts_removed() {
        let lessons = vec![lesson(
            &[],
            &[(Layout::StandardLayout, 1)],
            &["Default", "+mj-lt", "+mn-ea", "Comic Sans MS"],
        )];
        let summary = aggregate(&lessons).unwrap();
        assert_eq!(summary.design_system.fonts, vec!["Comic Sans MS"]);
        assert!(
            summary
                .visual_patterns
                .iter()
                .any(|p| p.contains("Comic Sans MS"))
        );
    }

    #[test]
    fn test_empty_corpus() {
        assert!(matches!(
            aggregate(&[]),
            Err(Error::NoAnalyzableInput { .. })
        ));
    }

    #[test]
    fn test_rank_by_frequency_ties_keep_first_seen() {
        let values: Vec<String> = ["b", "a", "a", "c", "b", "d"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(rank_by_frequency(values.iter()), vec!["b", "a", "c", "d"]);
    }

    proptest! {
        #[test]
        fn prop_totals_are_sums(counts in proptest::collection::vec(1usize..40, 1..12)) {
            let lessons: Vec<LessonStructure> = counts
                .iter()
                .map(|c| lesson(&[], &[(Layout::StandardLayout, *c)], &[]))
                .collect();
            let summary = aggregate(&lessons).unwrap();
            let total: usize = counts.iter().sum();
            prop_assert_eq!(summary.overview.total_slides, total);
            prop_assert_eq!(summary.overview.total_lessons, counts.len());
            let expected = (total as f64 / counts.len() as f64).round() as usize;
            prop_assert_eq!(summary.overview.average_slides_per_lesson, expected);

            let mut reversed = lessons.clone();
            reversed.reverse();
            let again = aggregate(&reversed).unwrap();
            prop_assert_eq!(again.overview, summary.overview);
        }
    }
}
