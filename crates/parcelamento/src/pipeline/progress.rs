use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Where a completed file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    Matched,
    Unmatched,
}

/// Events emitted by the batch processor while it aggregates results.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        total: usize,
    },
    FileCompleted {
        file_name: String,
        status: FileStatus,
        processed: usize,
        total: usize,
    },
    FileFailed {
        file_name: String,
        error: String,
        processed: usize,
        total: usize,
    },
    Finished {
        processed: usize,
        failed: usize,
        skipped: usize,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Point-in-time view of a running batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub failed: usize,
    pub total: usize,
}

impl ProgressSnapshot {
    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Counters that another thread can poll while a batch runs.
///
/// `processed` counts every completed file, failures included.
#[derive(Debug, Default)]
pub struct BatchProgress {
    processed: AtomicUsize,
    failed: AtomicUsize,
    total: AtomicUsize,
}

impl BatchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            processed: self.processed.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            total: self.total.load(Ordering::Acquire),
        }
    }
}

impl ProgressReporter for BatchProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                self.processed.store(0, Ordering::Release);
                self.failed.store(0, Ordering::Release);
                self.total.store(total, Ordering::Release);
            }
            ProgressEvent::FileCompleted { processed, .. } => {
                self.processed.store(processed, Ordering::Release);
            }
            ProgressEvent::FileFailed { processed, .. } => {
                self.failed.fetch_add(1, Ordering::AcqRel);
                self.processed.store(processed, Ordering::Release);
            }
            ProgressEvent::Finished { .. } => {}
        }
    }
}

/// Forwards every event to two reporters.
pub struct TeeProgress<'a> {
    first: &'a dyn ProgressReporter,
    second: &'a dyn ProgressReporter,
}

impl<'a> TeeProgress<'a> {
    pub fn new(first: &'a dyn ProgressReporter, second: &'a dyn ProgressReporter) -> Self {
        Self { first, second }
    }
}

impl ProgressReporter for TeeProgress<'_> {
    fn report(&self, event: ProgressEvent) {
        self.first.report(event.clone());
        self.second.report(event);
    }
}
