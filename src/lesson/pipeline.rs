//! End-to-end analysis of presentation files.
//!
//! One file goes archive → slide locator → (per slide) extractor and
//! classifier → slide aggregator. A corpus run analyzes many files and keeps
//! going when some of them fail; the failures are reported next to the
//! lessons that succeeded.
use crate::common::error::{Error, Result};
use crate::config::AnalyzerConfig;
use crate::lesson::aggregate::{SlideAggregator, analyze_slide};
use crate::lesson::corpus;
use crate::lesson::types::{CorpusSummary, LessonStructure, SlideAnalysis};
use crate::ooxml::archive::{PRESENTATION_PART, SLIDES_FOLDER, THEME_FOLDER};
use crate::ooxml::pptx::{PresentationPart, SlidePart, SlideSize, ThemePart, locate_slides};
use crate::ooxml::rels::{parse_relationships, rels_partname, slide_layout_target};
use crate::ooxml::{OoxmlError, PptxArchive};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A slide part read out of the archive, ready to be parsed.
#[derive(Debug)]
struct SlideSource {
    index: usize,
    name: String,
    xml: std::result::Result<String, OoxmlError>,
    layout_xml: Option<String>,
}

/// Analyze one presentation.
///
/// Malformed slides are replaced by placeholders. The file fails when the
/// bytes are not a ZIP, when `ppt/slides/` is missing, or when no slide at
/// all could be parsed.
///
/// # Examples
///
/// ```rust,no_run
/// use lesson_lens::config::AnalyzerConfig;
/// use lesson_lens::lesson::pipeline::analyze_presentation;
///
/// let data = std::fs::read("lesson.pptx")?;
/// let lesson = analyze_presentation(&data, &AnalyzerConfig::default())?;
/// println!("{}", lesson.to_json()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn analyze_presentation(data: &[u8], config: &AnalyzerConfig) -> Result<LessonStructure> {
    let mut archive = PptxArchive::open(data)?;

    let located = locate_slides(archive.list_entries(SLIDES_FOLDER));
    if located.parts.is_empty() {
        return Err(OoxmlError::NoSlidesRecovered { attempted: 0 }.into());
    }

    let size = slide_size(&mut archive);
    let theme = theme_defaults(&mut archive);

    // The archive is read sequentially; parsing below may run in parallel.
    let sources: Vec<SlideSource> = located
        .parts
        .iter()
        .enumerate()
        .map(|(i, name)| SlideSource {
            index: i + 1,
            name: name.clone(),
            xml: archive.read_entry_as_text(name),
            layout_xml: layout_xml(&mut archive, name),
        })
        .collect();

    let analyze = |source: &SlideSource| -> std::result::Result<SlideAnalysis, String> {
        let xml = source.xml.as_ref().map_err(|e| e.to_string())?;
        let content = SlidePart::new(&source.name, xml)
            .with_layout(source.layout_xml.as_deref())
            .extract(source.index, config)
            .map_err(|e| e.to_string())?;
        Ok(analyze_slide(&content, size, config))
    };

    let results: Vec<std::result::Result<SlideAnalysis, String>> = if config.parallel_slides {
        sources.par_iter().map(analyze).collect()
    } else {
        sources.iter().map(analyze).collect()
    };

    let mut aggregator = SlideAggregator::new(config)
        .with_theme_colors(theme.colors)
        .with_theme_fonts(theme.fonts);
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(slide) => aggregator.push(slide),
            Err(reason) => aggregator.push_failure(source.index, reason),
        }
    }

    let lesson = aggregator.finish()?;
    info!(
        slides = lesson.total_slides,
        placeholders = lesson.placeholder_count(),
        tier = ?located.tier,
        "presentation analyzed"
    );
    Ok(lesson)
}

/// Slide size from `ppt/presentation.xml`, or the 4:3 default.
fn slide_size(archive: &mut PptxArchive<'_>) -> SlideSize {
    let xml = match archive.read_optional_text(PRESENTATION_PART) {
        Ok(Some(xml)) => xml,
        Ok(None) => return SlideSize::default(),
        Err(e) => {
            debug!(error = %e, "presentation part unreadable");
            return SlideSize::default();
        },
    };
    PresentationPart::new(&xml).slide_size().unwrap_or_else(|e| {
        debug!(error = %e, "presentation part malformed");
        SlideSize::default()
    })
}

/// Colors (`#RRGGBB`) and font families of the first theme part.
#[derive(Debug, Default)]
struct ThemeDefaults {
    colors: Vec<String>,
    fonts: Vec<String>,
}

/// Read the first theme part; both lists are empty when there is none.
fn theme_defaults(archive: &mut PptxArchive<'_>) -> ThemeDefaults {
    let Some(name) = archive
        .list_entries(THEME_FOLDER)
        .into_iter()
        .find(|name| !name[THEME_FOLDER.len()..].contains('/') && name.ends_with(".xml"))
        .map(str::to_string)
    else {
        debug!("no theme part");
        return ThemeDefaults::default();
    };

    let xml = match archive.read_entry_as_text(&name) {
        Ok(xml) => xml,
        Err(e) => {
            debug!(part = %name, error = %e, "theme part unreadable");
            return ThemeDefaults::default();
        },
    };

    let part = ThemePart::new(&xml);
    let colors = part.color_values().unwrap_or_else(|e| {
        debug!(part = %name, error = %e, "theme colors unavailable");
        Vec::new()
    });
    let fonts = part.font_families().unwrap_or_else(|e| {
        debug!(part = %name, error = %e, "theme fonts unavailable");
        Vec::new()
    });
    ThemeDefaults {
        colors: colors.iter().map(ToString::to_string).collect(),
        fonts,
    }
}

/// XML of the layout a slide references, when it can be found.
fn layout_xml(archive: &mut PptxArchive<'_>, slide: &str) -> Option<String> {
    let rels_xml = archive.read_optional_text(&rels_partname(slide)).ok()??;
    let rels = parse_relationships(&rels_xml).ok()?;
    let target = slide_layout_target(slide, &rels)?;
    archive.read_optional_text(&target).ok()?
}

/// A lesson analyzed in a corpus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedLesson {
    pub name: String,
    pub structure: LessonStructure,
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of analyzing a set of files, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRun {
    pub lessons: Vec<AnalyzedLesson>,
    pub failures: Vec<FileFailure>,
}

/// Lesson flow of one file in a style profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFlow {
    pub name: String,
    pub flow: Vec<String>,
}

/// What the lesson generator receives: the corpus summary and each lesson's flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    pub summary: CorpusSummary,
    pub lesson_flows: Vec<LessonFlow>,
}

impl StyleProfile {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl CorpusRun {
    fn record(&mut self, name: String, outcome: Result<LessonStructure>) {
        match outcome {
            Ok(structure) => self.lessons.push(AnalyzedLesson { name, structure }),
            Err(e) => {
                warn!(file = %name, error = %e, "file skipped");
                self.failures.push(FileFailure {
                    name,
                    error: e.to_string(),
                });
            },
        }
    }

    /// Summarize the lessons that succeeded.
    ///
    /// Fails with [`Error::NoAnalyzableInput`] when none did.
    pub fn summary(&self) -> Result<CorpusSummary> {
        if self.lessons.is_empty() {
            return Err(Error::NoAnalyzableInput {
                failed: self.failures.len(),
            });
        }
        let structures: Vec<LessonStructure> = self
            .lessons
            .iter()
            .map(|lesson| lesson.structure.clone())
            .collect();
        corpus::aggregate(&structures)
    }

    /// Summary plus per-lesson flows.
    pub fn style_profile(&self) -> Result<StyleProfile> {
        Ok(StyleProfile {
            summary: self.summary()?,
            lesson_flows: self
                .lessons
                .iter()
                .map(|lesson| LessonFlow {
                    name: lesson.name.clone(),
                    flow: lesson.structure.lesson_flow.clone(),
                })
                .collect(),
        })
    }
}

/// Analyze many files in parallel. A failing file never stops the others.
pub fn analyze_corpus<N, D>(files: &[(N, D)], config: &AnalyzerConfig) -> CorpusRun
where
    N: AsRef<str> + Sync,
    D: AsRef<[u8]> + Sync,
{
    let outcomes: Vec<Result<LessonStructure>> = files
        .par_iter()
        .map(|(_, data)| analyze_presentation(data.as_ref(), config))
        .collect();

    let mut run = CorpusRun::default();
    for ((name, _), outcome) in files.iter().zip(outcomes) {
        run.record(name.as_ref().to_string(), outcome);
    }
    info!(
        lessons = run.lessons.len(),
        failures = run.failures.len(),
        "corpus run finished"
    );
    run
}

/// Analyze one file on the blocking thread pool.
pub async fn analyze_file_async(data: Vec<u8>, config: AnalyzerConfig) -> Result<LessonStructure> {
    tokio::task::spawn_blocking(move || analyze_presentation(&data, &config)).await?
}

/// Analyze many files, one blocking task per file, results in input order.
///
/// A task that panics is reported as a failure of its file.
pub async fn analyze_corpus_async(files: Vec<(String, Vec<u8>)>, config: AnalyzerConfig) -> CorpusRun {
    let handles: Vec<(String, tokio::task::JoinHandle<Result<LessonStructure>>)> = files
        .into_iter()
        .map(|(name, data)| {
            let config = config.clone();
            let handle =
                tokio::task::spawn_blocking(move || analyze_presentation(&data, &config));
            (name, handle)
        })
        .collect();

    let mut run = CorpusRun::default();
    for (name, handle) in handles {
        let outcome = handle.await.map_err(Error::from).and_then(|result| result);
        run.record(name, outcome);
    }
    run
}
