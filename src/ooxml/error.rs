/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// `InvalidArchive`, `MissingSlidesFolder` and `NoSlidesRecovered` are fatal
/// for one file. `SlidePartParse` is recovered per slide by the aggregator.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// The bytes are not a readable ZIP container
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// The archive has no `ppt/slides/` folder
    #[error("Missing slides folder: no entries under ppt/slides/")]
    MissingSlidesFolder,

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A slide part could not be read or parsed
    #[error("Failed to parse slide part {part}: {reason}")]
    SlidePartParse { part: String, reason: String },

    /// Every located slide failed to parse
    #[error("No slides recovered ({attempted} slide parts attempted)")]
    NoSlidesRecovered { attempted: usize },

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for OoxmlError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => {
                OoxmlError::PartNotFound("file not found in archive".to_string())
            },
            zip::result::ZipError::Io(e) => OoxmlError::Io(e),
            other => OoxmlError::InvalidArchive(other.to_string()),
        }
    }
}
