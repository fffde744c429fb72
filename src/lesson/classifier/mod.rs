//! Activity and content classification of slides.
//!
//! The activity label comes from the first strategy in [`strategy`] that
//! produces one:
//!
//! 1. a curated phrase in the title
//! 2. weighted keywords in the title
//! 3. weighted keywords in title and body
//! 4. slide structure (bullets, tables, images, text density)
//! 5. position (the first slide introduces the lesson)
//! 6. the title itself, title-cased
//!
//! and falls back to [`DEFAULT_ACTIVITY`]. A "Reading Activities" label is
//! discarded when the slide text is a copyright notice, and the chain goes on.
//!
//! The content label is independent: the first row of the content table with
//! a keyword in the slide text, else [`DEFAULT_CONTENT`].
//!
//! # Examples
//!
//! ```rust
//! use lesson_lens::config::AnalyzerConfig;
//! use lesson_lens::lesson::classifier::classify_text;
//!
//! let config = AnalyzerConfig::default();
//! let result = classify_text("Vocabulary: Animals", "match the animal words to their pictures", &config);
//! assert_eq!(result.activity_type, "Vocabulary Development");
//! ```
pub mod strategy;
pub mod tables;

pub use strategy::{
    ClassificationInput, Strategy, is_boilerplate, match_content_type, match_title_phrase,
    score_categories, title_case,
};

use crate::config::AnalyzerConfig;
use crate::lesson::types::{DEFAULT_ACTIVITY, DEFAULT_CONTENT};
use crate::ooxml::pptx::SlideContent;
use strategy::STRATEGIES;
use tracing::debug;

const READING_LABEL: &str = "Reading Activities";

/// Labels assigned to one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub activity_type: String,
    pub content_type: String,
    /// Strategy that produced `activity_type`
    pub strategy: Strategy,
}

/// Classify an extracted slide.
pub fn classify(content: &SlideContent, config: &AnalyzerConfig) -> Classification {
    classify_input(&ClassificationInput::from(content), config)
}

/// Classify from text alone (no structural or positional hints).
pub fn classify_text(title: &str, all_text: &str, config: &AnalyzerConfig) -> Classification {
    classify_input(&ClassificationInput::text(title, all_text), config)
}

/// Run the strategy chain over `input`.
pub fn classify_input(input: &ClassificationInput<'_>, config: &AnalyzerConfig) -> Classification {
    let full_text = input.full_text();
    let boilerplate = is_boilerplate(&full_text, config);

    let (activity_type, strategy) = STRATEGIES
        .iter()
        .find_map(|(strategy, apply)| {
            let label = apply(input, config)?;
            if boilerplate && label == READING_LABEL {
                debug!(?strategy, "discarding reading label on boilerplate slide");
                return None;
            }
            Some((label.into_owned(), *strategy))
        })
        .unwrap_or_else(|| (DEFAULT_ACTIVITY.to_string(), Strategy::Default));

    let content_type = match_content_type(&full_text).unwrap_or(DEFAULT_CONTENT);

    debug!(
        slide = ?input.slide_index,
        ?strategy,
        activity = %activity_type,
        content = content_type,
        "slide classified"
    );

    Classification {
        activity_type,
        content_type: content_type.to_string(),
        strategy,
    }
}
