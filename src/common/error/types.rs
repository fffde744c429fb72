//! Unified error types for lesson analysis.
//!
//! Errors from the OOXML layer, configuration loading and serialization are
//! all surfaced through one [`Error`] type at the crate boundary.
use thiserror::Error;

/// Main error type for lesson analysis operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a readable ZIP container
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// The archive has no `ppt/slides/` folder
    #[error("Missing slides folder")]
    MissingSlidesFolder,

    /// Stream or part not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// One slide part is malformed
    #[error("Slide part {part} could not be parsed: {reason}")]
    SlidePartParse { part: String, reason: String },

    /// Every slide of a file failed
    #[error("No slides recovered ({attempted} attempted)")]
    NoSlidesRecovered { attempted: usize },

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Corpus aggregation was asked to summarize zero lessons
    #[error("No analyzable input: {failed} file(s) failed, none succeeded")]
    NoAnalyzableInput { failed: usize },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A background analysis task panicked or was cancelled
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// Result type for lesson analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
