pub mod cache;
pub mod progress;
pub mod runner;

pub use cache::{AnalysisCache, ContentHash};
pub use progress::{
    BatchProgress, FileStatus, NoopProgress, ProgressEvent, ProgressReporter, ProgressSnapshot,
    TeeProgress,
};
pub use runner::{analyze_text, DocumentAnalysis, Pipeline};
