//! Holder for the latest batch result and the queries run against it.

pub mod filter;
pub mod summary;

pub use filter::{filter_by_company_name_substring, parse_search_terms, StatusChoice, StatusFilter};
pub use summary::BatchSummary;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::archive::ArchiveFile;
use crate::batch::{BatchResult, ClassificationRecord};

#[derive(Default)]
struct RepositoryState {
    current: Option<Arc<BatchResult>>,
    search_terms: Vec<String>,
}

/// Session-scoped store for the most recent [`BatchResult`].
///
/// Cloning shares the same state.
#[derive(Clone, Default)]
pub struct ResultRepository {
    state: Arc<RwLock<RepositoryState>>,
}

impl ResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RepositoryState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Result repository lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, RepositoryState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Result repository lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Stores a new result, dropping the previous one and any search terms.
    pub fn replace(&self, result: BatchResult) -> Arc<BatchResult> {
        let result = Arc::new(result);
        let mut state = self.write();
        state.current = Some(Arc::clone(&result));
        state.search_terms.clear();
        result
    }

    pub fn current(&self) -> Option<Arc<BatchResult>> {
        self.read().current.clone()
    }

    pub fn clear(&self) {
        let mut state = self.write();
        state.current = None;
        state.search_terms.clear();
    }

    pub fn set_search_terms(&self, terms: Vec<String>) {
        self.write().search_terms = terms;
    }

    pub fn search_terms(&self) -> Vec<String> {
        self.read().search_terms.clone()
    }

    /// Records of the current result matching `terms`. Empty when no result
    /// is stored.
    pub fn search(&self, terms: &[String]) -> Vec<ClassificationRecord> {
        match self.current() {
            Some(result) => filter_by_company_name_substring(&result.records, terms),
            None => Vec::new(),
        }
    }

    /// Search with the stored terms, then the status filter.
    pub fn filtered(&self, status: &StatusFilter) -> Vec<ClassificationRecord> {
        let terms = self.search_terms();
        status.apply(&self.search(&terms))
    }

    pub fn summary(&self) -> BatchSummary {
        self.current()
            .map(|result| BatchSummary::from_records(&result.records))
            .unwrap_or_default()
    }

    pub fn matched_file_for(&self, company_name: &str) -> Option<ArchiveFile> {
        self.current()?.matched_file_for(company_name).cloned()
    }
}
