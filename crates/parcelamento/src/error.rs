use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParcelamentoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The uploaded archive itself cannot be opened. Fatal for the batch.
    #[error("Failed to read archive: {0}")]
    Read(#[source] zip::result::ZipError),

    #[error("Failed to read archive entry '{name}': {source}")]
    ReadEntry {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open archive entry #{index}: {source}")]
    OpenEntry {
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to write archive entry '{name}': {source}")]
    WriteEntry {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive: {0}")]
    Write(#[source] zip::result::ZipError),
}

#[derive(Error, Debug)]
pub enum ProcessError {
    /// PDF bytes could not be parsed (corrupt, encrypted, not a PDF).
    #[error("Failed to read document: {0}")]
    DocumentRead(String),

    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Failed to spawn worker: {0}")]
    SpawnFailed(String),

    #[error("Worker channel closed unexpectedly")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ParcelamentoError>;
