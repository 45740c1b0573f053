use serde::Serialize;

use crate::batch::ClassificationRecord;

/// Installment counts over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub receita_federal_yes: usize,
    pub pgfn_yes: usize,
    pub both_yes: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ClassificationRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total += 1;
            if record.receita_federal_installment {
                summary.receita_federal_yes += 1;
            }
            if record.pgfn_installment {
                summary.pgfn_yes += 1;
            }
            if record.receita_federal_installment && record.pgfn_installment {
                summary.both_yes += 1;
            }
            summary
        })
    }

    pub fn receita_federal_no(&self) -> usize {
        self.total - self.receita_federal_yes
    }

    pub fn pgfn_no(&self) -> usize {
        self.total - self.pgfn_yes
    }
}
