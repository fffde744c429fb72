//! ZIP container access for `.pptx` packages.
//!
//! A `.pptx` file is a ZIP archive of XML parts. [`PptxArchive`] wraps the
//! `zip` reader over an in-memory byte slice and exposes the two operations
//! the analysis pipeline needs: listing entries under a folder prefix and
//! reading one entry as text.
use crate::ooxml::error::{OoxmlError, Result};
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

/// Folder that holds the slide parts of a presentation.
pub const SLIDES_FOLDER: &str = "ppt/slides/";

/// Folder that holds the theme parts of a presentation.
pub const THEME_FOLDER: &str = "ppt/theme/";

/// The main presentation part.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Upper bound for the buffer reserved up front when reading an entry.
///
/// The declared size comes from the archive itself; larger entries still
/// read fully, the buffer just grows as data arrives.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

/// UTF-8 byte order mark some producers prepend to XML parts.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A `.pptx` archive opened over borrowed bytes.
///
/// # Examples
///
/// ```rust,no_run
/// use lesson_lens::ooxml::PptxArchive;
///
/// let data = std::fs::read("lesson.pptx")?;
/// let mut archive = PptxArchive::open(&data)?;
/// for name in archive.list_entries("ppt/slides/") {
///     println!("{}", name);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PptxArchive<'data> {
    zip: ZipArchive<Cursor<&'data [u8]>>,
    /// File entry names (directories skipped), sorted
    names: Vec<String>,
}

impl<'data> PptxArchive<'data> {
    /// Open the bytes as a ZIP container.
    ///
    /// Fails with [`OoxmlError::InvalidArchive`] if the bytes are not a
    /// readable ZIP. No presentation-specific checks are made; see
    /// [`PptxArchive::open`].
    pub fn from_bytes(data: &'data [u8]) -> Result<Self> {
        let zip = ZipArchive::new(Cursor::new(data))
            .map_err(|e| OoxmlError::InvalidArchive(e.to_string()))?;

        let mut names: Vec<String> = zip
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(|name| name.trim_start_matches('/').to_string())
            .collect();
        names.sort();

        debug!(entries = names.len(), "opened zip container");
        Ok(Self { zip, names })
    }

    /// Open the bytes as a presentation archive.
    ///
    /// Same as [`PptxArchive::from_bytes`] plus a check that the mandatory
    /// `ppt/slides/` folder exists ([`OoxmlError::MissingSlidesFolder`]).
    pub fn open(data: &'data [u8]) -> Result<Self> {
        let archive = Self::from_bytes(data)?;
        if !archive.has_slides_folder() {
            return Err(OoxmlError::MissingSlidesFolder);
        }
        Ok(archive)
    }

    /// Whether any entry lives under `ppt/slides/`.
    pub fn has_slides_folder(&self) -> bool {
        self.names.iter().any(|name| name.starts_with(SLIDES_FOLDER))
    }

    /// Number of file entries in the archive.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the archive has no file entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether an entry with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        let normalized = name.strip_prefix('/').unwrap_or(name);
        self.names.binary_search_by(|n| n.as_str().cmp(normalized)).is_ok()
    }

    /// Entry names starting with `prefix`, sorted by name.
    pub fn list_entries(&self, prefix: &str) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Read and decompress one entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let normalized = name.strip_prefix('/').unwrap_or(name);
        let mut entry = match self.zip.by_name(normalized) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OoxmlError::PartNotFound(normalized.to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::with_capacity(preallocation(entry.size()));
        entry.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read one entry as text.
    ///
    /// A leading UTF-8 BOM is stripped. Invalid UTF-8 sequences are replaced
    /// rather than rejected, since a damaged byte should not cost a whole slide.
    pub fn read_entry_as_text(&mut self, name: &str) -> Result<String> {
        let data = self.read_entry(name)?;
        let body = data.strip_prefix(UTF8_BOM).unwrap_or(&data[..]);
        Ok(match std::str::from_utf8(body) {
            Ok(text) => text.to_string(),
            Err(_) => String::from_utf8_lossy(body).into_owned(),
        })
    }

    /// Read an entry if present, mapping absence to `None`.
    pub fn read_optional_text(&mut self, name: &str) -> Result<Option<String>> {
        if !self.contains(name) {
            return Ok(None);
        }
        self.read_entry_as_text(name).map(Some)
    }
}

/// Bytes to reserve for an entry declaring `declared_size` bytes.
fn preallocation(declared_size: u64) -> usize {
    usize::try_from(declared_size.min(MAX_PREALLOCATION)).unwrap_or(0)
}

impl std::fmt::Debug for PptxArchive<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PptxArchive")
            .field("file_count", &self.names.len())
            .finish()
    }
}
