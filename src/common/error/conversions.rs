//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! and third-party error types to the unified Error type.
use super::types::Error;
use crate::ooxml::error::OoxmlError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::InvalidArchive(s) => Error::InvalidArchive(s),
            OoxmlError::MissingSlidesFolder => Error::MissingSlidesFolder,
            OoxmlError::PartNotFound(s) => Error::ComponentNotFound(s),
            OoxmlError::SlidePartParse { part, reason } => Error::SlidePartParse { part, reason },
            OoxmlError::NoSlidesRecovered { attempted } => Error::NoSlidesRecovered { attempted },
            OoxmlError::Xml(s) => Error::XmlError(s),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            Error::TaskFailed("analysis task panicked".to_string())
        } else {
            Error::TaskFailed(err.to_string())
        }
    }
}
