//! The ordered activity strategies and the keyword automata they use.
use super::tables::{ACTIVITY_CATEGORIES, CONTENT_TYPES, MINOR_WORDS, TITLE_PHRASES};
use crate::config::AnalyzerConfig;
use crate::ooxml::pptx::SlideContent;
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Structural inference: minimum bullets and runs for a practice slide.
const PRACTICE_MIN_BULLETS: usize = 3;
const PRACTICE_MIN_RUNS: usize = 3;

/// Structural inference: an image slide with at most this many words presents content.
const VISUAL_MAX_WORDS: usize = 10;

/// Which strategy produced an activity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Curated phrase found in the title
    TitlePhrase,
    /// Weighted keyword match on the title
    TitleKeywords,
    /// Weighted keyword match on title and body
    TextKeywords,
    /// Bullets, tables, images or text density
    Structure,
    /// First slide of the deck
    Position,
    /// Title-cased title used verbatim
    TitleAsLabel,
    /// Nothing matched
    Default,
}

/// What the classifier looks at for one slide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationInput<'a> {
    pub title: &'a str,
    /// Lowercase body text
    pub all_text: &'a str,
    /// 1-based index, `None` when the slide's position is unknown
    pub slide_index: Option<usize>,
    pub bullet_count: usize,
    pub run_count: usize,
    pub word_count: usize,
    pub has_table: bool,
    pub has_images: bool,
}

impl<'a> ClassificationInput<'a> {
    /// Text-only input: no structure and no position.
    pub fn text(title: &'a str, all_text: &'a str) -> Self {
        Self {
            title,
            all_text,
            ..Self::default()
        }
    }

    /// Title and body joined, the haystack for body-level matching.
    pub fn full_text(&self) -> Cow<'a, str> {
        match (self.title.is_empty(), self.all_text.is_empty()) {
            (true, _) => Cow::Borrowed(self.all_text),
            (false, true) => Cow::Borrowed(self.title),
            (false, false) => Cow::Owned(format!("{} {}", self.title, self.all_text)),
        }
    }
}

impl<'a> From<&'a SlideContent> for ClassificationInput<'a> {
    fn from(content: &'a SlideContent) -> Self {
        Self {
            title: &content.title,
            all_text: &content.all_text,
            slide_index: Some(content.slide_index),
            bullet_count: content.bullet_count,
            run_count: content.text_run_count(),
            word_count: content.word_count(),
            has_table: content.has_table,
            has_images: content.has_images,
        }
    }
}

pub(crate) type StrategyFn =
    fn(&ClassificationInput<'_>, &AnalyzerConfig) -> Option<Cow<'static, str>>;

/// Activity strategies in priority order.
pub(crate) const STRATEGIES: [(Strategy, StrategyFn); 6] = [
    (Strategy::TitlePhrase, title_phrase),
    (Strategy::TitleKeywords, title_keywords),
    (Strategy::TextKeywords, text_keywords),
    (Strategy::Structure, structure),
    (Strategy::Position, position),
    (Strategy::TitleAsLabel, title_as_label),
];

/// Keyword automaton remembering which table row each pattern came from.
struct KeywordIndex {
    automaton: AhoCorasick,
    owners: Vec<usize>,
}

impl KeywordIndex {
    fn build<'t>(rows: impl Iterator<Item = &'t [&'static str]>) -> Self {
        let mut patterns = Vec::new();
        let mut owners = Vec::new();
        for (row, keywords) in rows.enumerate() {
            for keyword in keywords {
                patterns.push(*keyword);
                owners.push(row);
            }
        }
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .expect("Failed to build keyword automaton");
        Self { automaton, owners }
    }

    /// Distinct keyword hits per row.
    fn row_hits(&self, haystack: &str, rows: usize) -> SmallVec<[u32; 24]> {
        let mut seen = vec![false; self.owners.len()];
        for m in self.automaton.find_overlapping_iter(haystack) {
            seen[m.pattern().as_usize()] = true;
        }

        let mut hits: SmallVec<[u32; 24]> = SmallVec::from_elem(0, rows);
        for (pattern, hit) in seen.into_iter().enumerate() {
            if hit {
                hits[self.owners[pattern]] += 1;
            }
        }
        hits
    }
}

// Static initialization: automata are built only once, thread-safe
static TITLE_PHRASE_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(TITLE_PHRASES.iter().map(|(phrase, _)| *phrase))
        .expect("Failed to build title phrase automaton")
});

static CATEGORY_INDEX: Lazy<KeywordIndex> =
    Lazy::new(|| KeywordIndex::build(ACTIVITY_CATEGORIES.iter().map(|c| c.keywords)));

static CONTENT_INDEX: Lazy<KeywordIndex> =
    Lazy::new(|| KeywordIndex::build(CONTENT_TYPES.iter().map(|(_, keywords)| *keywords)));

/// Label of the earliest title-map entry found in `title`.
pub fn match_title_phrase(title: &str) -> Option<&'static str> {
    TITLE_PHRASE_MATCHER
        .find_overlapping_iter(title)
        .map(|m| m.pattern().as_usize())
        .min()
        .map(|idx| TITLE_PHRASES[idx].1)
}

/// Highest scoring category for `text` (hits × priority), earliest on ties.
pub fn score_categories(text: &str) -> Option<&'static str> {
    let hits = CATEGORY_INDEX.row_hits(text, ACTIVITY_CATEGORIES.len());

    let mut best: Option<(&'static str, u32)> = None;
    for (category, count) in ACTIVITY_CATEGORIES.iter().zip(hits) {
        let score = count * category.priority;
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((category.label, score));
        }
    }
    best.map(|(label, _)| label)
}

/// Content type of `text`: the first table row with any keyword present.
pub fn match_content_type(text: &str) -> Option<&'static str> {
    CONTENT_INDEX
        .automaton
        .find_overlapping_iter(text)
        .map(|m| CONTENT_INDEX.owners[m.pattern().as_usize()])
        .min()
        .map(|row| CONTENT_TYPES[row].0)
}

fn title_phrase(input: &ClassificationInput<'_>, _: &AnalyzerConfig) -> Option<Cow<'static, str>> {
    match_title_phrase(input.title).map(Cow::Borrowed)
}

fn title_keywords(
    input: &ClassificationInput<'_>,
    _: &AnalyzerConfig,
) -> Option<Cow<'static, str>> {
    score_categories(input.title).map(Cow::Borrowed)
}

fn text_keywords(input: &ClassificationInput<'_>, _: &AnalyzerConfig) -> Option<Cow<'static, str>> {
    score_categories(&input.full_text()).map(Cow::Borrowed)
}

fn structure(input: &ClassificationInput<'_>, config: &AnalyzerConfig) -> Option<Cow<'static, str>> {
    let label = if input.bullet_count >= PRACTICE_MIN_BULLETS && input.run_count >= PRACTICE_MIN_RUNS
    {
        "Practice Activities"
    } else if input.has_table {
        "Matching Activities"
    } else if input.has_images && input.word_count <= VISUAL_MAX_WORDS {
        "Content Presentation"
    } else if input.run_count > config.text_heavy_threshold && input.bullet_count == 0 {
        "Reading Activities"
    } else {
        return None;
    };
    Some(Cow::Borrowed(label))
}

fn position(input: &ClassificationInput<'_>, _: &AnalyzerConfig) -> Option<Cow<'static, str>> {
    (input.slide_index == Some(1)).then_some(Cow::Borrowed("Introduction"))
}

fn title_as_label(
    input: &ClassificationInput<'_>,
    config: &AnalyzerConfig,
) -> Option<Cow<'static, str>> {
    let title = input.title.trim();
    let len = title.chars().count();
    if len < config.title_label_min_chars || len > config.title_label_max_chars {
        return None;
    }
    Some(Cow::Owned(title_case(title)))
}

/// Capitalize each word, keeping minor words lowercase after the first.
///
/// Letters after the first are left alone so acronyms survive.
pub fn title_case(title: &str) -> String {
    title
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && MINOR_WORDS.contains(lower.as_str()) {
                return lower;
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Copyright notice together with the configured branding string.
pub fn is_boilerplate(text: &str, config: &AnalyzerConfig) -> bool {
    let text = text.to_lowercase();
    text.contains("copyright") && text.contains(&config.boilerplate_marker.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_phrase_takes_earliest_entry() {
        // "review" (row 21) and "grammar" (row 11): grammar is registered first.
        assert_eq!(match_title_phrase("Grammar Review"), Some("Grammar Focus"));
        assert_eq!(match_title_phrase("WARM-UP"), Some("Introduction"));
        assert_eq!(match_title_phrase("Animals"), None);
    }

    #[test]
    fn test_scores_count_distinct_keywords() {
        // Two listening keywords (7 × 2) beat one assessment keyword (9).
        assert_eq!(
            score_categories("listen to the audio and take the quiz"),
            Some("Listening Activities")
        );
        assert_eq!(score_categories("nothing relevant here"), None);
    }

    #[test]
    fn test_tie_keeps_first_registered() {
        // "match" (Matching, 8) and "fill in" (Gap Fill, 8).
        assert_eq!(score_categories("Match and fill in"), Some("Matching Activities"));
    }

    #[test]
    fn test_example_is_not_an_exam() {
        assert_eq!(score_categories("for example"), None);
    }

    #[test]
    fn test_content_type_first_row() {
        assert_eq!(
            match_content_type("review the grammar"),
            Some("Grammar Point")
        );
        assert_eq!(match_content_type("let's discuss"), None);
    }

    #[test]
    fn test_structure_rules() {
        let config = AnalyzerConfig::default();
        let practice = ClassificationInput {
            bullet_count: 3,
            run_count: 4,
            ..ClassificationInput::default()
        };
        assert_eq!(structure(&practice, &config).as_deref(), Some("Practice Activities"));

        let table = ClassificationInput {
            has_table: true,
            ..ClassificationInput::default()
        };
        assert_eq!(structure(&table, &config).as_deref(), Some("Matching Activities"));

        let visual = ClassificationInput {
            has_images: true,
            word_count: 4,
            ..ClassificationInput::default()
        };
        assert_eq!(structure(&visual, &config).as_deref(), Some("Content Presentation"));

        let dense = ClassificationInput {
            run_count: 8,
            ..ClassificationInput::default()
        };
        assert_eq!(structure(&dense, &config).as_deref(), Some("Reading Activities"));

        assert_eq!(structure(&ClassificationInput::default(), &config), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my favourite places"), "My Favourite Places");
        assert_eq!(title_case("story of the week"), "Story of the Week");
        assert_eq!(title_case("the BBC   news"), "The BBC News");
    }

    #[test]
    fn test_title_label_bounds() {
        let config = AnalyzerConfig::default();
        let single = ClassificationInput::text("A", "");
        assert_eq!(title_as_label(&single, &config), None);
        let long = "word ".repeat(20);
        assert_eq!(title_as_label(&ClassificationInput::text(&long, ""), &config), None);
    }

    #[test]
    fn test_boilerplate() {
        let config = AnalyzerConfig::default();
        assert!(is_boilerplate("Copyright 2024 Acme. All rights reserved.", &config));
        assert!(!is_boilerplate("copyright only", &config));
    }
}
