use serde::{Deserialize, Serialize};
use tracing::debug;

pub const RF_SECTION_TITLE: &str = "Diagnóstico Fiscal na Receita Federal";
pub const PGFN_SECTION_TITLE: &str = "Diagnóstico Fiscal na Procuradoria-Geral da Fazenda Nacional";

pub const RF_INSTALLMENT_MARKER: &str = "EM PARCELAMENTO";
pub const PGFN_INSTALLMENT_MARKER: &str = "Pendência - Parcelamento";

const RF_BASE_UNAVAILABLE: &str = "BASE INDISPONÍVEL";
const RF_INSTALLMENT_WORD: &str = "Parcelamento";
const PGFN_NO_PENDING_ITEMS: &str = "Não foram detectadas pendências/exigibilidades suspensas";

/// Installment status for the two report sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub receita_federal: bool,
    pub pgfn: bool,
}

/// Classifies a full report text. Exact, case-sensitive marker lookups.
///
/// The Receita Federal section is only read when both section titles are
/// present with RF first; otherwise RF resolves to `false`.
pub fn classify(text: &str) -> Classification {
    let rf_start = text.find(RF_SECTION_TITLE);
    let pgfn_start = text.find(PGFN_SECTION_TITLE);

    let rf_section = match (rf_start, pgfn_start) {
        (Some(rf), Some(pgfn)) if rf <= pgfn => &text[rf..pgfn],
        _ => "",
    };
    let pgfn_section = pgfn_start.map(|pgfn| &text[pgfn..]).unwrap_or("");

    Classification {
        receita_federal: receita_federal_installment(rf_section),
        pgfn: pgfn_installment(pgfn_section),
    }
}

fn receita_federal_installment(section: &str) -> bool {
    let mut installment = section.contains(RF_INSTALLMENT_MARKER);
    // Vestigial rule: never changes the primary outcome.
    if !installment
        && section.contains(RF_BASE_UNAVAILABLE)
        && section.contains(RF_INSTALLMENT_WORD)
    {
        debug!("RF base unavailable with installment mention, keeping no installment");
        installment = false;
    }
    installment
}

fn pgfn_installment(section: &str) -> bool {
    let mut installment = section.contains(PGFN_INSTALLMENT_MARKER);
    // Vestigial rule: never changes the primary outcome.
    if !installment && section.contains(PGFN_NO_PENDING_ITEMS) {
        debug!("PGFN reports no pending items, keeping no installment");
        installment = false;
    }
    installment
}
