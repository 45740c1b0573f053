use moka::sync::Cache;
use sha2::{Digest, Sha256};

use super::runner::DocumentAnalysis;

/// SHA-256 of a document's raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }
}

/// Bounded, content-addressed cache of document analyses.
///
/// Entries are evicted by moka's size-bounded policy once `capacity` is
/// reached. A capacity of zero disables caching.
#[derive(Clone)]
pub struct AnalysisCache {
    inner: Option<Cache<ContentHash, DocumentAnalysis>>,
}

impl AnalysisCache {
    pub fn new(capacity: u64) -> Self {
        let inner = (capacity > 0).then(|| Cache::new(capacity));
        Self { inner }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Hashes `bytes` when caching is enabled; `None` otherwise.
    pub fn key_for(&self, bytes: &[u8]) -> Option<ContentHash> {
        self.inner.as_ref().map(|_| ContentHash::of(bytes))
    }

    pub fn get(&self, key: &ContentHash) -> Option<DocumentAnalysis> {
        self.inner.as_ref().and_then(|cache| cache.get(key))
    }

    pub fn insert(&self, key: ContentHash, analysis: DocumentAnalysis) {
        if let Some(cache) = &self.inner {
            cache.insert(key, analysis);
        }
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
        }
    }
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("enabled", &self.is_enabled())
            .field(
                "entries",
                &self.inner.as_ref().map(|c| c.entry_count()).unwrap_or(0),
            )
            .finish()
    }
}
