use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, info_span, warn};

use crate::archive::{read_archive, InputArchive};
use crate::batch::result::{BatchResult, BatchWarning, ClassificationRecord};
use crate::config::Config;
use crate::error::{Result, WorkerError};
use crate::pipeline::{
    AnalysisCache, FileStatus, NoopProgress, Pipeline, ProgressEvent, ProgressReporter,
};
use crate::processor::{PdfTextExtractor, TextExtractor};
use crate::worker::{CancellationToken, FailureKind, Job, JobOutcome, JobResult, WorkerPool};

/// Classifies every PDF of an archive on a bounded worker pool.
///
/// The processor owns the analysis cache, so identical documents uploaded in
/// later batches are not re-extracted.
pub struct BatchProcessor {
    config: Config,
    pipeline: Arc<Pipeline>,
}

impl BatchProcessor {
    pub fn new(config: Config) -> Self {
        Self::with_extractor(config, Arc::new(PdfTextExtractor::new()))
    }

    pub fn with_extractor(config: Config, extractor: Arc<dyn TextExtractor>) -> Self {
        let cache = AnalysisCache::new(config.cache_capacity);
        let pipeline = Arc::new(Pipeline::new(extractor, cache));
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clear_cache(&self) {
        self.pipeline.cache().clear();
    }

    /// Reads and processes a zip archive. An unreadable archive fails the
    /// whole batch before any file is processed.
    pub fn process_archive_bytes(&self, bytes: &[u8]) -> Result<BatchResult> {
        self.process_archive_bytes_with(bytes, &NoopProgress, &CancellationToken::new())
    }

    pub fn process_archive_bytes_with(
        &self,
        bytes: &[u8],
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<BatchResult> {
        let archive = read_archive(bytes)?;
        Ok(self.process(archive, progress, cancel)?)
    }

    pub fn process(
        &self,
        archive: InputArchive,
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> std::result::Result<BatchResult, WorkerError> {
        let (pdfs, ignored) = archive.into_pdf_entries();
        let total = pdfs.len();

        let mut result = BatchResult::new();
        result.ignored_entries = ignored;

        let _batch_span = info_span!("batch",
            batch_id = %result.batch_id,
            files = total,
            ignored = ignored,
        )
        .entered();

        progress.report(ProgressEvent::Started { total });

        if total == 0 {
            warn!("Archive contains no PDF files");
            result.warnings.push(BatchWarning::NoPdfEntries);
            progress.report(ProgressEvent::Finished {
                processed: 0,
                failed: 0,
                skipped: 0,
            });
            return Ok(result);
        }

        let jobs: Vec<Job> = pdfs.into_iter().map(Job::new).collect();
        let mut pending: HashMap<String, String> = jobs
            .iter()
            .map(|job| (job.id.clone(), job.file_name().to_string()))
            .collect();

        let worker_count = self.config.worker_count.clamp(1, total);
        let pool = WorkerPool::new(Arc::clone(&self.pipeline), worker_count, cancel.clone())?;
        debug!(workers = pool.worker_count(), "Worker pool ready");

        let mut processed = 0;
        thread::scope(|scope| {
            scope.spawn(|| {
                for job in jobs {
                    if let Err(e) = pool.submit(job) {
                        warn!("Stopped submitting jobs: {}", e);
                        break;
                    }
                }
            });

            // Single consumer: the only place the result is mutated.
            while !pending.is_empty() {
                let Some(job_result) = pool.recv_result() else {
                    break;
                };
                pending.remove(&job_result.job_id);
                aggregate(&mut result, job_result, &mut processed, total, progress);
            }
        });

        pool.wait();

        for file_name in pending.into_values() {
            warn!(file = %file_name, "No result received for file");
            result.push_failure(
                file_name,
                FailureKind::WorkerLost,
                "Worker stopped before reporting a result".to_string(),
            );
        }

        if !result.skipped.is_empty() {
            result.warnings.push(BatchWarning::Cancelled {
                skipped: result.skipped.len(),
            });
        }

        progress.report(ProgressEvent::Finished {
            processed,
            failed: result.failures.len(),
            skipped: result.skipped.len(),
        });

        info!(
            records = result.records.len(),
            unmatched = result.unmatched_files.len(),
            failures = result.failures.len(),
            skipped = result.skipped.len(),
            "Batch complete"
        );

        Ok(result)
    }
}

fn aggregate(
    result: &mut BatchResult,
    job_result: JobResult,
    processed: &mut usize,
    total: usize,
    progress: &dyn ProgressReporter,
) {
    let file = job_result.file;

    match job_result.outcome {
        JobOutcome::Analyzed(analysis) => {
            *processed += 1;
            let file_name = file.name.clone();

            let status = match analysis.company_name {
                Some(company_name) => {
                    let record = ClassificationRecord {
                        company_name,
                        receita_federal_installment: analysis.classification.receita_federal,
                        pgfn_installment: analysis.classification.pgfn,
                        source_file_name: file_name.clone(),
                    };
                    result.push_matched(record, file);
                    FileStatus::Matched
                }
                None => {
                    debug!(file = %file_name, "No company name found");
                    result.push_unmatched(file);
                    FileStatus::Unmatched
                }
            };

            progress.report(ProgressEvent::FileCompleted {
                file_name,
                status,
                processed: *processed,
                total,
            });
        }
        JobOutcome::Failed { kind, message } => {
            *processed += 1;
            warn!(file = %file.name, error = %message, "Failed to process file");

            progress.report(ProgressEvent::FileFailed {
                file_name: file.name.clone(),
                error: message.clone(),
                processed: *processed,
                total,
            });
            result.push_failure(file.name, kind, message);
        }
        JobOutcome::Cancelled => {
            result.skipped.push(file.name);
        }
    }
}
