use std::sync::Arc;

use serde::Serialize;

use crate::archive::ArchiveFile;
use crate::pipeline::DocumentAnalysis;

#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub file: ArchiveFile,
}

impl Job {
    pub fn new(file: ArchiveFile) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file.name
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.file.bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The document bytes could not be parsed.
    DocumentRead,
    /// The job panicked while running.
    WorkerPanicked,
    /// The job never reported back.
    WorkerLost,
}

#[derive(Debug, Clone)]
pub enum JobOutcome {
    Analyzed(DocumentAnalysis),
    Failed { kind: FailureKind, message: String },
    Cancelled,
}

#[derive(Debug)]
pub struct JobResult {
    pub job_id: String,
    pub file: ArchiveFile,
    pub outcome: JobOutcome,
}

impl JobResult {
    pub fn analyzed(job: Job, analysis: DocumentAnalysis) -> Self {
        Self {
            job_id: job.id,
            file: job.file,
            outcome: JobOutcome::Analyzed(analysis),
        }
    }

    pub fn failure(job: Job, kind: FailureKind, message: String) -> Self {
        Self {
            job_id: job.id,
            file: job.file,
            outcome: JobOutcome::Failed { kind, message },
        }
    }

    pub fn cancelled(job: Job) -> Self {
        Self {
            job_id: job.id,
            file: job.file,
            outcome: JobOutcome::Cancelled,
        }
    }
}
