use std::str::FromStr;

use serde::Serialize;

use crate::batch::ClassificationRecord;

/// Keeps records whose company name contains at least one of `terms`,
/// ignoring case. No terms keeps everything.
pub fn filter_by_company_name_substring(
    records: &[ClassificationRecord],
    terms: &[String],
) -> Vec<ClassificationRecord> {
    if terms.is_empty() {
        return records.to_vec();
    }

    let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    records
        .iter()
        .filter(|record| {
            let name = record.company_name.to_lowercase();
            terms.iter().any(|term| name.contains(term.as_str()))
        })
        .cloned()
        .collect()
}

/// Splits free-text search input on commas, pipes and newlines.
pub fn parse_search_terms(input: &str) -> Vec<String> {
    input
        .split([',', '|', '\n'])
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusChoice {
    #[default]
    Any,
    Yes,
    No,
}

impl StatusChoice {
    pub fn accepts(self, value: bool) -> bool {
        match self {
            StatusChoice::Any => true,
            StatusChoice::Yes => value,
            StatusChoice::No => !value,
        }
    }
}

impl FromStr for StatusChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "todos" => Ok(StatusChoice::Any),
            "sim" | "yes" => Ok(StatusChoice::Yes),
            "nao" | "não" | "no" => Ok(StatusChoice::No),
            other => Err(format!("Invalid status '{}': expected any, sim or nao", other)),
        }
    }
}

/// Installment status filter applied per authority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFilter {
    pub receita_federal: StatusChoice,
    pub pgfn: StatusChoice,
}

impl StatusFilter {
    pub fn matches(&self, record: &ClassificationRecord) -> bool {
        self.receita_federal.accepts(record.receita_federal_installment)
            && self.pgfn.accepts(record.pgfn_installment)
    }

    pub fn apply(&self, records: &[ClassificationRecord]) -> Vec<ClassificationRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
