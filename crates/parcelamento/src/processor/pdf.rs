use crate::error::ProcessError;
use crate::processor::{ExtractedText, TextExtractor};

/// Text extraction backed by lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ProcessError> {
        let _span = tracing::debug_span!("processor.pdf", bytes = bytes.len()).entered();

        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ProcessError::DocumentRead(format!("Failed to load PDF: {}", e)))?;

        Ok(ExtractedText::from_pages(extract_pages(&doc)))
    }
}

fn extract_pages(doc: &lopdf::Document) -> Vec<String> {
    // get_pages is keyed by page number, so iteration is in page order
    doc.get_pages()
        .into_keys()
        .map(|page_num| match doc.extract_text(&[page_num]) {
            Ok(text) => text,
            Err(e) => {
                tracing::trace!(page = page_num, error = %e, "No extractable text on page");
                String::new()
            }
        })
        .collect()
}

pub fn extract_full_text(bytes: &[u8]) -> Result<String, ProcessError> {
    PdfTextExtractor.extract(bytes).map(|text| text.full_text())
}

pub fn extract_header_text(bytes: &[u8]) -> Result<String, ProcessError> {
    PdfTextExtractor.extract(bytes).map(|text| text.header_text())
}
