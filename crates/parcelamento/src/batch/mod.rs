pub mod processor;
pub mod result;

pub use processor::BatchProcessor;
pub use result::{BatchResult, BatchWarning, ClassificationRecord, FileFailure};
