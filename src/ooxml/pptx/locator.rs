//! Discovery and ordering of slide parts.
//!
//! Export tools do not agree on slide part names. PowerPoint writes
//! `ppt/slides/slideN.xml`, but converters have been seen producing
//! `Slide_3.xml`, `slide-03.xml` or bare `3.xml`. Slides are located in three
//! tiers, the first non-empty tier wins:
//!
//! 1. `slide<digits>.xml` (case-insensitive)
//! 2. any `.xml` whose name contains `slide`
//! 3. any `.xml` directly in the folder
//!
//! The result is sorted by the first number found in the file name, so
//! `slide10.xml` follows `slide2.xml`.
use crate::ooxml::archive::SLIDES_FOLDER;
use tracing::debug;

/// Which naming tier produced the located slide parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorTier {
    /// `slide<digits>.xml`
    Canonical,
    /// `.xml` files containing "slide"
    NameContainsSlide,
    /// every `.xml` file in the folder
    AnyXml,
}

/// Ordered slide part names found under `ppt/slides/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSlides {
    pub parts: Vec<String>,
    pub tier: Option<LocatorTier>,
}

/// Locate and order slide parts among archive entry names.
///
/// Only direct children of `ppt/slides/` are considered, which skips the
/// `_rels/` folder and any nested media.
///
/// # Examples
///
/// ```rust
/// use lesson_lens::ooxml::pptx::locate_slides;
///
/// let entries = ["ppt/slides/slide10.xml", "ppt/slides/slide2.xml", "ppt/slides/slide1.xml"];
/// let located = locate_slides(entries);
/// assert_eq!(
///     located.parts,
///     vec!["ppt/slides/slide1.xml", "ppt/slides/slide2.xml", "ppt/slides/slide10.xml"]
/// );
/// ```
pub fn locate_slides<'a, I>(entries: I) -> LocatedSlides
where
    I: IntoIterator<Item = &'a str>,
{
    let xml_files: Vec<(&str, &str)> = entries
        .into_iter()
        .filter_map(|entry| {
            let file = entry.strip_prefix(SLIDES_FOLDER)?;
            if file.contains('/') || !file.to_ascii_lowercase().ends_with(".xml") {
                return None;
            }
            Some((entry, file))
        })
        .collect();

    let tiers: [(LocatorTier, fn(&str) -> bool); 3] = [
        (LocatorTier::Canonical, is_canonical_slide_name),
        (LocatorTier::NameContainsSlide, |file| {
            file.to_ascii_lowercase().contains("slide")
        }),
        (LocatorTier::AnyXml, |_| true),
    ];

    for (tier, matches) in tiers {
        let mut parts: Vec<&str> = xml_files
            .iter()
            .filter(|(_, file)| matches(file))
            .map(|(entry, _)| *entry)
            .collect();

        if parts.is_empty() {
            continue;
        }

        parts.sort_by(|a, b| {
            slide_number(a)
                .cmp(&slide_number(b))
                .then_with(|| a.cmp(b))
        });
        debug!(?tier, count = parts.len(), "located slide parts");

        return LocatedSlides {
            parts: parts.into_iter().map(str::to_string).collect(),
            tier: Some(tier),
        };
    }

    LocatedSlides {
        parts: Vec::new(),
        tier: None,
    }
}

/// `slide<digits>.xml`, ignoring case.
fn is_canonical_slide_name(file: &str) -> bool {
    let lower = file.to_ascii_lowercase();
    lower
        .strip_prefix("slide")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// First run of ASCII digits in the file name of `part`, or 0 when absent.
///
/// Only the file name is inspected so the folder path never contributes.
pub fn slide_number(part: &str) -> u64 {
    let file = part.rsplit('/').next().unwrap_or(part);
    let bytes = file.as_bytes();
    let Some(start) = bytes.iter().position(u8::is_ascii_digit) else {
        return 0;
    };
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset);

    let parsed: Option<u64> = atoi_simd::parse::<u64, false, false>(&bytes[start..end]).ok();
    // More digits than fit in u64 sort last rather than first.
    parsed.unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let located = locate_slides([
            "ppt/slides/slide10.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide1.xml",
        ]);
        assert_eq!(located.tier, Some(LocatorTier::Canonical));
        assert_eq!(
            located.parts,
            vec![
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/slides/slide10.xml"
            ]
        );
    }

    #[test]
    fn test_rels_and_non_xml_are_ignored() {
        let located = locate_slides([
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/slides/notes.txt",
            "ppt/slideLayouts/slideLayout1.xml",
        ]);
        assert_eq!(located.parts, vec!["ppt/slides/slide1.xml"]);
    }

    #[test]
    fn test_canonical_tier_preferred_over_looser_names() {
        let located = locate_slides([
            "ppt/slides/slide2.xml",
            "ppt/slides/Slide_Extra.xml",
            "ppt/slides/other.xml",
        ]);
        assert_eq!(located.tier, Some(LocatorTier::Canonical));
        assert_eq!(located.parts, vec!["ppt/slides/slide2.xml"]);
    }

    #[test]
    fn test_fallback_to_names_containing_slide() {
        let located = locate_slides([
            "ppt/slides/Slide_3.xml",
            "ppt/slides/Slide_1.xml",
            "ppt/slides/cover.xml",
        ]);
        assert_eq!(located.tier, Some(LocatorTier::NameContainsSlide));
        assert_eq!(
            located.parts,
            vec!["ppt/slides/Slide_1.xml", "ppt/slides/Slide_3.xml"]
        );
    }

    #[test]
    fn test_fallback_to_any_xml() {
        let located = locate_slides(["ppt/slides/b.xml", "ppt/slides/2.xml", "ppt/slides/a.xml"]);
        assert_eq!(located.tier, Some(LocatorTier::AnyXml));
        // Missing digits sort as 0, ahead of "2".
        assert_eq!(
            located.parts,
            vec!["ppt/slides/a.xml", "ppt/slides/b.xml", "ppt/slides/2.xml"]
        );
    }

    #[test]
    fn test_empty_folder() {
        let located = locate_slides(["ppt/presentation.xml"]);
        assert!(located.parts.is_empty());
        assert_eq!(located.tier, None);
    }

    #[test]
    fn test_slide_number() {
        assert_eq!(slide_number("ppt/slides/slide12.xml"), 12);
        assert_eq!(slide_number("ppt/slides/slide-03-final.xml"), 3);
        assert_eq!(slide_number("ppt/slides/cover.xml"), 0);
    }

    proptest! {
        #[test]
        fn prop_order_is_numeric_and_stable(numbers in proptest::collection::hash_set(0u32..10_000, 1..40)) {
            let names: Vec<String> = numbers.into_iter().map(|n| format!("ppt/slides/slide{n}.xml")).collect();
            let located = locate_slides(names.iter().map(String::as_str));
            prop_assert_eq!(located.parts.len(), names.len());
            let order: Vec<u64> = located.parts.iter().map(|p| slide_number(p)).collect();
            let mut sorted = order.clone();
            sorted.sort_unstable();
            prop_assert_eq!(order, sorted);

            let mut reversed = names.clone();
            reversed.reverse();
            let again = locate_slides(reversed.iter().map(String::as_str));
            prop_assert_eq!(again.parts, located.parts);
        }
    }
}
