pub mod reader;
pub mod writer;

use std::sync::Arc;

pub use reader::{read_archive, InputArchive};
pub use writer::{write_output_archive, NOT_FOUND_DIR, RENAMED_DIR};

/// A named blob inside an archive. Bytes are shared, never copied per bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl ArchiveFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// True when the name ends in `.pdf`, compared ASCII case-insensitively.
    pub fn is_pdf(&self) -> bool {
        is_pdf_name(&self.name)
    }
}

pub fn is_pdf_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_name() {
        assert!(is_pdf_name("report.pdf"));
        assert!(is_pdf_name("REPORT.PDF"));
        assert!(is_pdf_name("lote/Relatorio.Pdf"));
        assert!(is_pdf_name(".pdf"));
        assert!(!is_pdf_name("report.pdf.txt"));
        assert!(!is_pdf_name("pdf"));
        assert!(!is_pdf_name("notes.txt"));
        assert!(!is_pdf_name(""));
    }

    #[test]
    fn test_is_pdf_name_multibyte_prefix() {
        assert!(is_pdf_name("relatório.pdf"));
        assert!(!is_pdf_name("ção"));
    }
}
