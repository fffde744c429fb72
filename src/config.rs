//! Configuration for the analysis pipeline.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment.
//! Environment variables use the `LESSON_LENS_` prefix, e.g.
//! `LESSON_LENS_TEXT_HEAVY_THRESHOLD=3`.

use crate::common::error::{Error, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable thresholds of the extractor, classifier and aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// A slide with more text runs than this is text-heavy.
    pub text_heavy_threshold: usize,
    /// Shortest title (in characters) usable as an activity label.
    pub title_label_min_chars: usize,
    /// Longest title (in characters) usable as an activity label.
    pub title_label_max_chars: usize,
    /// The first-run title fallback only takes runs shorter than this.
    pub title_max_chars: usize,
    /// Branding string that, together with "copyright", marks boilerplate text.
    pub boilerplate_marker: String,
    /// Parse the slides of one file in parallel.
    pub parallel_slides: bool,
    /// Top up the per-slide colors from the theme when fewer than this many were found.
    pub theme_fallback_min_colors: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            text_heavy_threshold: 5,
            title_label_min_chars: 2,
            title_label_max_chars: 50,
            title_max_chars: 100,
            boilerplate_marker: "all rights reserved".to_string(),
            parallel_slides: true,
            theme_fallback_min_colors: 6,
        }
    }
}

impl AnalyzerConfig {
    /// Check that the bounds are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.title_label_min_chars > self.title_label_max_chars {
            return Err(Error::Config(format!(
                "title_label_min_chars ({}) exceeds title_label_max_chars ({})",
                self.title_label_min_chars, self.title_label_max_chars
            )));
        }
        if self.title_max_chars == 0 {
            return Err(Error::Config("title_max_chars must be positive".to_string()));
        }
        if self.boilerplate_marker.trim().is_empty() {
            return Err(Error::Config("boilerplate_marker must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `LESSON_LENS_`)
/// 2. The TOML file at `path`, when given and present
/// 3. Built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    let mut figment = Figment::from(Serialized::defaults(AnalyzerConfig::default()));

    if let Some(path) = path {
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
    }

    figment = figment.merge(Env::prefixed("LESSON_LENS_"));

    let config: AnalyzerConfig = figment.extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.text_heavy_threshold, 5);
        assert_eq!(config.title_label_max_chars, 50);
        assert!(config.parallel_slides);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.title_max_chars, 100);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson-lens.toml");
        std::fs::write(
            &path,
            "text_heavy_threshold = 3\nboilerplate_marker = \"acme english\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.text_heavy_threshold, 3);
        assert_eq!(config.boilerplate_marker, "acme english");
        // Untouched keys keep their defaults.
        assert_eq!(config.title_label_min_chars, 2);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.theme_fallback_min_colors, 6);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "title_label_min_chars = 60\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.toml");
        std::fs::write(&path, "parallel_slides = \"sometimes\"\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }
}
