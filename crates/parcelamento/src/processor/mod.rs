pub mod pdf;

use std::path::Path;

use crate::error::ProcessError;

pub use pdf::{extract_full_text, extract_header_text, PdfTextExtractor};

/// Number of leading pages searched for the company header.
pub const HEADER_PAGE_COUNT: usize = 2;

/// Plain text of a document, one entry per page in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pages: Vec<String>,
}

impl ExtractedText {
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every page's text followed by a newline.
    pub fn full_text(&self) -> String {
        join_pages(&self.pages)
    }

    pub fn header_pages(&self) -> &[String] {
        let end = self.pages.len().min(HEADER_PAGE_COUNT);
        &self.pages[..end]
    }

    pub fn header_text(&self) -> String {
        join_pages(self.header_pages())
    }
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ProcessError>;

    fn extract_file(&self, path: &Path) -> Result<ExtractedText, ProcessError> {
        let bytes = std::fs::read(path).map_err(|e| ProcessError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.extract(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pages: &[&str]) -> ExtractedText {
        ExtractedText::from_pages(pages.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn test_full_text_appends_newline_per_page() {
        let text = sample(&["one", "", "three"]);
        assert_eq!(text.full_text(), "one\n\nthree\n");
    }

    #[test]
    fn test_header_limited_to_two_pages() {
        let text = sample(&["first", "second", "third"]);
        assert_eq!(text.header_pages().len(), 2);
        assert_eq!(text.header_text(), "first\nsecond\n");
    }

    #[test]
    fn test_header_of_single_page_document() {
        let text = sample(&["only"]);
        assert_eq!(text.header_text(), "only\n");
        assert_eq!(text.header_text(), text.full_text());
    }

    #[test]
    fn test_empty_document() {
        let text = ExtractedText::default();
        assert_eq!(text.page_count(), 0);
        assert!(text.full_text().is_empty());
        assert!(text.header_text().is_empty());
    }

    #[test]
    fn test_extract_file_not_found() {
        let result = PdfTextExtractor::new().extract_file(Path::new("/nonexistent/report.pdf"));
        match result {
            Err(ProcessError::ReadFile { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/report.pdf"));
            }
            other => panic!("Expected ReadFile error, got {:?}", other),
        }
    }
}
