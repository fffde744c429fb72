//! Layout and visual design classification of a single slide.
use crate::common::style::{Rect, Third};
use crate::config::AnalyzerConfig;
use crate::lesson::types::{ContentLayout, DesignPatterns, ImageAlignment, Layout, TitlePosition};
use crate::ooxml::pptx::{PlaceholderKind, SlideContent, SlideSize};

/// A slide with at most this many runs counts as sparse.
const SPARSE_MAX_RUNS: usize = 2;

/// Pictures narrower than this share of the slide can be logos.
const LOGO_MAX_WIDTH_RATIO: f64 = 0.15;

/// Pictures at least this wide bleed to the edges.
const FULL_BLEED_MIN_RATIO: f64 = 0.80;

/// Pictures at least this wide take half the slide.
const HALF_WIDTH_MIN_RATIO: f64 = 0.40;

/// Classify the visual layout of a slide.
///
/// Rules are checked in order; the first that applies wins.
pub fn classify_layout(content: &SlideContent, config: &AnalyzerConfig) -> Layout {
    let runs = content.text_run_count();

    if content.has_table {
        Layout::TableLayout
    } else if content.title_placeholder == Some(PlaceholderKind::CenterTitle)
        || (content.slide_index == 1 && runs <= SPARSE_MAX_RUNS && !content.has_images)
    {
        Layout::TitleSlide
    } else if content.has_images && runs <= SPARSE_MAX_RUNS {
        Layout::VisualFocused
    } else if content.has_images {
        Layout::MixedContent
    } else if runs > config.text_heavy_threshold {
        Layout::TextHeavy
    } else if content.has_bullets {
        Layout::BulletPoints
    } else {
        Layout::StandardLayout
    }
}

/// Title position, content layout, image alignment, colors and fonts.
pub fn design_patterns(content: &SlideContent, size: SlideSize) -> DesignPatterns {
    let title_position = match content.title_frame {
        Some(frame) if !content.title.is_empty() => {
            match Third::of(frame.center_y(), size.height) {
                Third::First => TitlePosition::Top,
                Third::Middle => TitlePosition::Center,
                Third::Last => TitlePosition::Bottom,
            }
        },
        _ => TitlePosition::None,
    };

    let visuals = content.pictures.len().max(usize::from(content.has_images))
        + usize::from(content.has_table);
    let content_layout = match visuals {
        0 => ContentLayout::TextOnly,
        1 => ContentLayout::SingleFocus,
        _ => ContentLayout::MultiElement,
    };

    let image_alignment = match content.pictures.first() {
        Some(picture) => match Third::of(picture.center_x(), size.width) {
            Third::First => ImageAlignment::Left,
            Third::Middle => ImageAlignment::Center,
            Third::Last => ImageAlignment::Right,
        },
        // Images without a frame (e.g. picture fills) sit where the layout puts them.
        None if content.has_images => ImageAlignment::Center,
        None => ImageAlignment::None,
    };

    let mut font_hierarchy = content.fonts.clone();
    for run in &content.text_runs {
        if let Some(family) = run.font_family.as_deref() {
            if !family.starts_with('+') && !font_hierarchy.iter().any(|f| f == family) {
                font_hierarchy.push(family.to_string());
            }
        }
    }

    DesignPatterns {
        title_position,
        content_layout,
        image_alignment,
        color_scheme: content.colors.clone(),
        font_hierarchy,
    }
}

/// Corner of each small picture touching a corner region, distinct.
pub fn logo_positions(pictures: &[Rect], size: SlideSize) -> Vec<String> {
    let mut positions: Vec<String> = Vec::new();
    for picture in pictures {
        if picture.width_ratio(size.width) >= LOGO_MAX_WIDTH_RATIO {
            continue;
        }
        let vertical = match Third::of(picture.center_y(), size.height) {
            Third::First => "top",
            Third::Last => "bottom",
            Third::Middle => continue,
        };
        let horizontal = match Third::of(picture.center_x(), size.width) {
            Third::First => "left",
            Third::Last => "right",
            Third::Middle => continue,
        };
        let position = format!("{vertical}-{horizontal}");
        if !positions.contains(&position) {
            positions.push(position);
        }
    }
    positions
}

/// Width class of each picture, distinct, first-seen order.
pub fn image_styles(pictures: &[Rect], size: SlideSize) -> Vec<String> {
    let mut styles: Vec<String> = Vec::new();
    for picture in pictures {
        let ratio = picture.width_ratio(size.width);
        let style = if ratio >= FULL_BLEED_MIN_RATIO {
            "full-bleed"
        } else if ratio >= HALF_WIDTH_MIN_RATIO {
            "half-width"
        } else {
            "inline"
        };
        if !styles.iter().any(|s| s == style) {
            styles.push(style.to_string());
        }
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::RawTextRun;

    fn slide(index: usize, runs: usize) -> SlideContent {
        let text_runs: Vec<RawTextRun> = (0..runs)
            .map(|i| RawTextRun::new(format!("run {i}"), None, None, None))
            .collect();
        SlideContent {
            slide_index: index,
            title: String::new(),
            all_text: text_runs
                .iter()
                .map(|r| r.text.to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
            text_runs,
            has_images: false,
            has_table: false,
            has_bullets: false,
            bullet_count: 0,
            layout_hints: Vec::new(),
            background_color: "#FFFFFF".to_string(),
            colors: Vec::new(),
            fonts: Vec::new(),
            title_placeholder: None,
            title_frame: None,
            pictures: Vec::new(),
        }
    }

    fn rect(x: i64, y: i64, cx: i64, cy: i64) -> Rect {
        Rect { x, y, cx, cy }
    }

    #[test]
    fn test_layout_rules_in_order() {
        let config = AnalyzerConfig::default();

        let mut table = slide(3, 10);
        table.has_table = true;
        table.has_images = true;
        assert_eq!(classify_layout(&table, &config), Layout::TableLayout);

        assert_eq!(classify_layout(&slide(1, 2), &config), Layout::TitleSlide);

        let mut centered = slide(5, 4);
        centered.title_placeholder = Some(PlaceholderKind::CenterTitle);
        assert_eq!(classify_layout(&centered, &config), Layout::TitleSlide);

        let mut visual = slide(2, 1);
        visual.has_images = true;
        assert_eq!(classify_layout(&visual, &config), Layout::VisualFocused);

        let mut mixed = slide(2, 3);
        mixed.has_images = true;
        assert_eq!(classify_layout(&mixed, &config), Layout::MixedContent);

        assert_eq!(classify_layout(&slide(2, 6), &config), Layout::TextHeavy);
        assert_eq!(classify_layout(&slide(2, 5), &config), Layout::StandardLayout);

        let mut bullets = slide(2, 4);
        bullets.has_bullets = true;
        assert_eq!(classify_layout(&bullets, &config), Layout::BulletPoints);
    }

    #[test]
    fn test_design_patterns() {
        let size = SlideSize::default();
        let mut content = slide(2, 3);
        content.title = "Heading".to_string();
        content.title_frame = Some(rect(0, 300_000, 9_000_000, 1_000_000));
        content.has_images = true;
        content.pictures = vec![rect(6_500_000, 2_000_000, 2_000_000, 2_000_000)];
        content.fonts = vec!["Arial".to_string()];
        content.text_runs[0].font_family = Some("Georgia".to_string());

        let patterns = design_patterns(&content, size);
        assert_eq!(patterns.title_position, TitlePosition::Top);
        assert_eq!(patterns.content_layout, ContentLayout::SingleFocus);
        assert_eq!(patterns.image_alignment, ImageAlignment::Right);
        assert_eq!(patterns.font_hierarchy, vec!["Arial", "Georgia"]);
    }

    #[test]
    fn test_text_only_slide_patterns() {
        let patterns = design_patterns(&slide(2, 3), SlideSize::default());
        assert_eq!(patterns.title_position, TitlePosition::None);
        assert_eq!(patterns.content_layout, ContentLayout::TextOnly);
        assert_eq!(patterns.image_alignment, ImageAlignment::None);
    }

    #[test]
    fn test_logo_and_image_styles() {
        let size = SlideSize::default();
        let pictures = vec![
            rect(8_300_000, 100_000, 700_000, 500_000),
            rect(0, 0, 9_144_000, 6_858_000),
            rect(100_000, 6_200_000, 600_000, 500_000),
            rect(4_000_000, 3_000_000, 900_000, 900_000),
        ];
        assert_eq!(logo_positions(&pictures, size), vec!["top-right", "bottom-left"]);
        assert_eq!(image_styles(&pictures, size), vec!["inline", "full-bleed"]);
    }
}
