use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::archive::{write_output_archive, ArchiveFile};
use crate::config::ArchiveCompression;
use crate::error::ArchiveError;
use crate::worker::FailureKind;

/// One classified company. Only produced when a company name was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    pub company_name: String,
    pub receita_federal_installment: bool,
    pub pgfn_installment: bool,
    pub source_file_name: String,
}

impl ClassificationRecord {
    /// Name of the renamed copy in the output archive.
    pub fn renamed_file_name(&self) -> String {
        format!("{}.pdf", self.company_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub file_name: String,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchWarning {
    /// The archive held no `.pdf` entries.
    NoPdfEntries,
    /// The batch was cancelled before every file was processed.
    Cancelled { skipped: usize },
}

impl std::fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchWarning::NoPdfEntries => write!(f, "Nenhum arquivo PDF encontrado no ZIP"),
            BatchWarning::Cancelled { skipped } => {
                write!(f, "Processamento cancelado; {} arquivo(s) não processado(s)", skipped)
            }
        }
    }
}

/// Output of one pipeline run over an archive.
///
/// `records` and `matched_files` are index-aligned. Record order is the
/// completion order of the workers and varies between runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub batch_id: String,
    pub processed_at: DateTime<Utc>,
    pub records: Vec<ClassificationRecord>,
    #[serde(skip)]
    pub matched_files: Vec<ArchiveFile>,
    #[serde(skip)]
    pub unmatched_files: Vec<ArchiveFile>,
    pub failures: Vec<FileFailure>,
    pub skipped: Vec<String>,
    pub ignored_entries: usize,
    pub warnings: Vec<BatchWarning>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self {
            batch_id: uuid::Uuid::new_v4().to_string(),
            processed_at: Utc::now(),
            records: Vec::new(),
            matched_files: Vec::new(),
            unmatched_files: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            ignored_entries: 0,
            warnings: Vec::new(),
        }
    }

    pub fn push_matched(&mut self, record: ClassificationRecord, file: ArchiveFile) {
        let renamed = ArchiveFile {
            name: record.renamed_file_name(),
            bytes: file.bytes,
        };
        self.records.push(record);
        self.matched_files.push(renamed);
    }

    pub fn push_unmatched(&mut self, file: ArchiveFile) {
        self.unmatched_files.push(file);
    }

    pub fn push_failure(&mut self, file_name: String, kind: FailureKind, message: String) {
        self.failures.push(FileFailure {
            file_name,
            kind,
            message,
        });
    }

    /// Number of PDF entries that reached a bucket, a failure, or were skipped.
    pub fn accounted_entries(&self) -> usize {
        self.records.len() + self.unmatched_files.len() + self.failures.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.unmatched_files.is_empty()
    }

    /// Records sorted by company name, then source file, for stable display.
    pub fn sorted_records(&self) -> Vec<ClassificationRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| {
            a.company_name
                .cmp(&b.company_name)
                .then_with(|| a.source_file_name.cmp(&b.source_file_name))
        });
        records
    }

    /// The renamed PDF for a company, if one was matched.
    pub fn matched_file_for(&self, company_name: &str) -> Option<&ArchiveFile> {
        self.records
            .iter()
            .position(|r| r.company_name == company_name)
            .map(|i| &self.matched_files[i])
    }

    pub fn to_archive(&self, compression: ArchiveCompression) -> Result<Vec<u8>, ArchiveError> {
        write_output_archive(&self.matched_files, &self.unmatched_files, compression)
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}
