use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    #[serde(default)]
    pub output: OutputArchiveConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_worker_count() -> usize {
    num_cpus::get()
}

fn default_cache_capacity() -> u64 {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            worker_count: default_worker_count(),
            cache_capacity: default_cache_capacity(),
            output: OutputArchiveConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputArchiveConfig {
    #[serde(default)]
    pub compression: ArchiveCompression,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveCompression {
    #[default]
    Deflated,
    Stored,
}

impl ArchiveCompression {
    pub fn method(self) -> zip::CompressionMethod {
        match self {
            ArchiveCompression::Deflated => zip::CompressionMethod::Deflated,
            ArchiveCompression::Stored => zip::CompressionMethod::Stored,
        }
    }
}
