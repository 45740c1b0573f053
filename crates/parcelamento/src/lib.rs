pub mod archive;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod repository;
pub mod sanitize;
pub mod worker;

pub use archive::{read_archive, write_output_archive, ArchiveFile, InputArchive};
pub use batch::{BatchProcessor, BatchResult, BatchWarning, ClassificationRecord, FileFailure};
pub use classifier::{classify, extract_company_name, Classification};
pub use config::{load_config, ArchiveCompression, Config};
pub use error::{
    ArchiveError, ConfigError, ParcelamentoError, ProcessError, Result, WorkerError,
};
pub use pipeline::{
    AnalysisCache, BatchProgress, DocumentAnalysis, Pipeline, ProgressEvent, ProgressReporter,
};
pub use processor::{PdfTextExtractor, TextExtractor};
pub use repository::{
    filter_by_company_name_substring, parse_search_terms, BatchSummary, ResultRepository,
    StatusChoice, StatusFilter,
};
pub use worker::CancellationToken;
