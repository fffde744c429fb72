//! Lookup tables of the activity/content classifier.
//!
//! All matching is case-insensitive substring matching. Keywords are chosen
//! so that they do not occur inside common unrelated words ("exam" would hit
//! "example", so only "exams" is listed).

/// Title phrase to activity label. The first entry found in the title wins.
pub const TITLE_PHRASES: &[(&str, &str)] = &[
    ("warm up", "Introduction"),
    ("warm-up", "Introduction"),
    ("warmer", "Introduction"),
    ("lead in", "Introduction"),
    ("lead-in", "Introduction"),
    ("learning objectives", "Learning Objectives"),
    ("lesson aims", "Learning Objectives"),
    ("objectives", "Learning Objectives"),
    ("vocabulary", "Vocabulary Development"),
    ("key words", "Vocabulary Development"),
    ("grammar focus", "Grammar Focus"),
    ("grammar", "Grammar Focus"),
    ("pronunciation", "Pronunciation Practice"),
    ("role play", "Role Play"),
    ("role-play", "Role Play"),
    ("discussion", "Discussion Activities"),
    ("listening", "Listening Activities"),
    ("reading", "Reading Activities"),
    ("writing", "Writing Activities"),
    ("speaking", "Speaking Activities"),
    ("homework", "Homework Assignment"),
    ("review", "Review & Summary"),
    ("summary", "Review & Summary"),
    ("quiz", "Assessment"),
    ("conclusion", "Lesson Conclusion"),
    ("wrap up", "Lesson Conclusion"),
];

/// A weighted activity category.
#[derive(Debug, Clone, Copy)]
pub struct ActivityCategory {
    pub label: &'static str,
    pub priority: u32,
    pub keywords: &'static [&'static str],
}

const fn category(
    label: &'static str,
    priority: u32,
    keywords: &'static [&'static str],
) -> ActivityCategory {
    ActivityCategory {
        label,
        priority,
        keywords,
    }
}

/// Activity categories in registration order. Earlier entries win ties.
pub const ACTIVITY_CATEGORIES: &[ActivityCategory] = &[
    category(
        "Learning Objectives",
        10,
        &["objective", "aims", "goal", "by the end of", "learning outcome", "you will be able"],
    ),
    category(
        "Introduction",
        9,
        &[
            "warm up", "warm-up", "warmer", "introduction", "lead in", "lead-in", "welcome",
            "starter", "icebreaker",
        ],
    ),
    category(
        "Vocabulary Development",
        9,
        &[
            "vocabulary", "new words", "key words", "word bank", "word list", "definitions",
            "glossary",
        ],
    ),
    category(
        "Grammar Focus",
        9,
        &[
            "grammar", "tense", "verbs", "adjectives", "nouns", "sentence structure",
            "conditional", "passive voice",
        ],
    ),
    category(
        "Pronunciation Practice",
        8,
        &["pronunciation", "pronounce", "stress", "intonation", "phonetic", "sounds"],
    ),
    category(
        "Matching Activities",
        8,
        &["match", "matching", "pair up", "connect the", "link the"],
    ),
    category(
        "Gap Fill Activities",
        8,
        &["gap", "fill in", "blank", "complete the", "missing word"],
    ),
    category(
        "Role Play",
        8,
        &["role play", "role-play", "act out", "roleplay", "scenario", "in character"],
    ),
    category(
        "Discussion Activities",
        8,
        &[
            "discuss", "discussion", "opinion", "debate", "talk about", "what do you think",
            "share your",
        ],
    ),
    category(
        "Listening Activities",
        7,
        &["listen", "listening", "audio", "podcast", "recording"],
    ),
    category(
        "Reading Activities",
        7,
        &["reading", "read the", "article", "passage", "comprehension"],
    ),
    category(
        "Writing Activities",
        7,
        &["writing", "write", "essay", "paragraph", "compose"],
    ),
    category(
        "Speaking Activities",
        7,
        &["speaking", "speak", "tell your partner", "conversation", "interview"],
    ),
    category(
        "Practice Activities",
        6,
        &["practice", "practise", "exercise", "activity", "task", "drill"],
    ),
    category(
        "Interactive Games",
        7,
        &["game", "bingo", "quiz game", "competition", "team challenge", "puzzle"],
    ),
    category(
        "Collaborative Learning",
        6,
        &[
            "group work", "in groups", "pair work", "in pairs", "work together", "partner",
            "collaborate",
        ],
    ),
    category(
        "Assessment",
        9,
        &[
            "assessment", "quiz", "exams", "evaluate", "check your understanding", "self-check",
            "mini test",
        ],
    ),
    category(
        "Review & Summary",
        8,
        &["review", "summary", "recap", "revision", "key points", "remember"],
    ),
    category(
        "Feedback & Correction",
        7,
        &["feedback", "correction", "correct the mistakes", "error correction", "peer review"],
    ),
    category(
        "Content Presentation",
        6,
        &["presentation", "introduce", "explain", "overview", "background", "facts"],
    ),
    category(
        "Homework Assignment",
        9,
        &["homework", "assignment", "for next class", "at home", "take home"],
    ),
    category(
        "Lesson Conclusion",
        9,
        &["conclusion", "wrap up", "wrap-up", "goodbye", "thank you", "see you next", "well done"],
    ),
];

/// Content-type table. The first entry with any keyword present wins.
pub const CONTENT_TYPES: &[(&str, &[&str])] = &[
    ("Learning Objectives", &["objective", "aims", "goal", "by the end of"]),
    ("Introduction", &["warm up", "warm-up", "introduction", "welcome", "lead in"]),
    ("Vocabulary Introduction", &["vocabulary", "new words", "key words", "word list"]),
    ("Grammar Point", &["grammar", "tense", "sentence structure", "verbs"]),
    ("Practice Activity", &["practice", "practise", "exercise", "activity", "task"]),
    ("Homework/Conclusion", &["homework", "assignment", "conclusion", "wrap up"]),
    ("Review/Summary", &["review", "summary", "recap"]),
];

/// Words kept lowercase when a title is turned into a label (unless first).
pub static MINOR_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "into", "nor",
    "of", "on", "or", "the", "to", "vs", "with",
};
