use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info_span};

use crate::classifier::{classify, extract_company_name_from_pages, Classification};
use crate::error::ProcessError;
use crate::processor::{ExtractedText, TextExtractor};
use crate::sanitize;

use super::cache::AnalysisCache;

/// Outcome of analysing one document. `company_name` is `None` when no CNPJ
/// header was found in the first two pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub company_name: Option<String>,
    pub classification: Classification,
}

/// Per-document unit of work: extract text, parse the company, classify.
pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    cache: AnalysisCache,
}

impl Pipeline {
    pub fn new(extractor: Arc<dyn TextExtractor>, cache: AnalysisCache) -> Self {
        Self { extractor, cache }
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Runs the pipeline for one archive entry.
    pub fn run(&self, file_name: &str, bytes: &[u8]) -> Result<DocumentAnalysis, ProcessError> {
        let _pipeline_span = info_span!("analyze_document",
            file = %sanitize::display_name(file_name),
            bytes = bytes.len(),
        )
        .entered();

        let key = self.cache.key_for(bytes);
        if let Some(hit) = key.as_ref().and_then(|k| self.cache.get(k)) {
            debug!("Analysis cache hit");
            return Ok(hit);
        }

        let text = {
            let _step = debug_span!("extract_text").entered();
            self.extractor.extract(bytes)?
        };

        let analysis = analyze_text(&text);

        if let Some(key) = key {
            self.cache.insert(key, analysis.clone());
        }

        debug!(
            company = analysis.company_name.as_deref().unwrap_or("<none>"),
            rf = analysis.classification.receita_federal,
            pgfn = analysis.classification.pgfn,
            "Document analyzed"
        );
        Ok(analysis)
    }
}

/// Applies the company parser to the header pages and the classifier to the
/// full text.
pub fn analyze_text(text: &ExtractedText) -> DocumentAnalysis {
    let company_name = {
        let _step = debug_span!("parse_company").entered();
        extract_company_name_from_pages(text.header_pages())
    };

    let classification = {
        let _step = debug_span!("classify").entered();
        classify(&text.full_text())
    };

    DocumentAnalysis {
        company_name,
        classification,
    }
}
