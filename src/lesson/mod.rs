//! Pedagogical analysis of presentations.
//!
//! - [`classifier`]: activity and content labels for one slide
//! - [`layout`]: visual layout and design patterns of one slide
//! - [`aggregate`]: one [`LessonStructure`] per presentation
//! - [`corpus`]: one [`CorpusSummary`] over many lessons
//! - [`pipeline`]: file and corpus entry points
pub mod aggregate;
pub mod classifier;
pub mod corpus;
pub mod layout;
pub mod pipeline;
pub mod types;

pub use aggregate::{SlideAggregator, analyze_slide};
pub use classifier::{Classification, Strategy, classify, classify_text};
pub use pipeline::{
    AnalyzedLesson, CorpusRun, FileFailure, LessonFlow, StyleProfile, analyze_corpus,
    analyze_corpus_async, analyze_file_async, analyze_presentation,
};
pub use types::{
    CorpusSummary, DesignPatterns, DesignSystem, Layout, LessonStructure, PedagogicalPatterns,
    SlideAnalysis,
};
