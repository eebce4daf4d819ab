//! Paper record scraped from a conference listing.

use serde::{Deserialize, Serialize};

/// Titles must be longer than this many characters to be accepted.
///
/// Shorter bold fragments on listing pages are almost always navigation or
/// session headings rather than paper titles.
pub const MIN_TITLE_CHARS: usize = 10;

/// A paper as it appears on the conference listing
///
/// Records are immutable once built; the only way to create one is
/// [`PaperRecord::try_new`], which rejects titles that are too short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    title: String,
    authors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    r#abstract: Option<String>,
}

impl PaperRecord {
    /// Create a record, trimming both fields.
    ///
    /// Returns `None` if the trimmed title is not longer than
    /// [`MIN_TITLE_CHARS`] characters.
    pub fn try_new(title: impl AsRef<str>, authors: impl AsRef<str>) -> Option<Self> {
        let title = title.as_ref().trim();
        if !is_plausible_title(title) {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            authors: authors.as_ref().trim().to_string(),
            r#abstract: None,
        })
    }

    /// Attach an abstract (empty text is ignored)
    pub fn with_abstract(mut self, abstract_text: impl AsRef<str>) -> Self {
        let text = abstract_text.as_ref().trim();
        self.r#abstract = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &str {
        &self.authors
    }

    pub fn abstract_text(&self) -> Option<&str> {
        self.r#abstract.as_deref()
    }

    /// Lower-cased `title + " " + authors`, the text keywords are matched against
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title.to_lowercase(), self.authors.to_lowercase())
    }
}

/// Check the scraped-title length heuristic
pub fn is_plausible_title(title: &str) -> bool {
    title.chars().count() > MIN_TITLE_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_trims_fields() {
        let record = PaperRecord::try_new("  Learning Diffusion Priors  ", " J. Smith ").unwrap();
        assert_eq!(record.title(), "Learning Diffusion Priors");
        assert_eq!(record.authors(), "J. Smith");
        assert_eq!(record.abstract_text(), None);
    }

    #[test]
    fn test_try_new_rejects_short_titles() {
        assert!(PaperRecord::try_new("", "Someone").is_none());
        assert!(PaperRecord::try_new("Poster", "Someone").is_none());
        // exactly 10 characters is still too short
        assert!(PaperRecord::try_new("0123456789", "").is_none());
        assert!(PaperRecord::try_new("0123456789A", "").is_some());
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 11 characters, 22 bytes
        assert!(is_plausible_title("ááááááááááá"));
        assert!(!is_plausible_title("áááááááááá"));
    }

    #[test]
    fn test_with_abstract() {
        let record = PaperRecord::try_new("A Sufficiently Long Title", "")
            .unwrap()
            .with_abstract("  Some abstract ");
        assert_eq!(record.abstract_text(), Some("Some abstract"));

        let record = record.with_abstract("   ");
        assert_eq!(record.abstract_text(), None);
    }

    #[test]
    fn test_search_text() {
        let record = PaperRecord::try_new("Diffusion Models Beat GANs", "Alice SMITH").unwrap();
        assert_eq!(record.search_text(), "diffusion models beat gans alice smith");
    }
}
