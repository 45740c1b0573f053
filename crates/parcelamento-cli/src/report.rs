use std::fmt::Write as _;

use serde::Serialize;

use parcelamento::{BatchResult, BatchSummary, ClassificationRecord};

const COMPANY_HEADER: &str = "Empresa";
const RF_HEADER: &str = "Parcelamento RF";
const PGFN_HEADER: &str = "Parcelamento PGFN";

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

/// Fixed-width table of records, one per line.
pub fn render_table(records: &[ClassificationRecord]) -> String {
    let company_width = records
        .iter()
        .map(|r| r.company_name.chars().count())
        .chain(std::iter::once(COMPANY_HEADER.len()))
        .max()
        .unwrap_or(COMPANY_HEADER.len());

    let mut out = String::new();
    push_row(&mut out, company_width, COMPANY_HEADER, RF_HEADER, PGFN_HEADER);
    let rule_width = company_width + RF_HEADER.len() + PGFN_HEADER.len() + 6;
    let _ = writeln!(out, "{}", "-".repeat(rule_width));

    for record in records {
        push_row(
            &mut out,
            company_width,
            &record.company_name,
            yes_no(record.receita_federal_installment),
            yes_no(record.pgfn_installment),
        );
    }
    out
}

fn push_row(out: &mut String, company_width: usize, company: &str, rf: &str, pgfn: &str) {
    let _ = writeln!(
        out,
        "{:<cw$} | {:<rw$} | {}",
        company,
        rf,
        pgfn,
        cw = company_width,
        rw = RF_HEADER.len(),
    );
}

pub fn render_summary(summary: &BatchSummary) -> String {
    format!(
        "Empresas: {}\nParcelamento RF: {} sim / {} não\nParcelamento PGFN: {} sim / {} não\nAmbos: {}\n",
        summary.total,
        summary.receita_federal_yes,
        summary.receita_federal_no(),
        summary.pgfn_yes,
        summary.pgfn_no(),
        summary.both_yes,
    )
}

/// Table and summary for the records left after filtering, or a notice when
/// nothing is left to show. Summary counts cover only `records`.
pub fn render_records(
    records: &[ClassificationRecord],
    terms: &[String],
    batch_has_records: bool,
) -> String {
    if !batch_has_records {
        return "Nenhuma empresa identificada.\n".to_string();
    }
    if records.is_empty() {
        return if terms.is_empty() {
            "Nenhuma empresa corresponde aos filtros selecionados.\n".to_string()
        } else {
            format!("Nenhuma empresa encontrada com os termos: {}\n", terms.join(", "))
        };
    }

    format!(
        "{}\n{}",
        render_table(records),
        render_summary(&BatchSummary::from_records(records))
    )
}

/// JSON document written by `process --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub batch: &'a BatchResult,
    pub summary: BatchSummary,
    pub unmatched_files: Vec<&'a str>,
    pub filtered_records: Vec<ClassificationRecord>,
}

impl<'a> JsonReport<'a> {
    pub fn new(batch: &'a BatchResult, filtered_records: Vec<ClassificationRecord>) -> Self {
        Self {
            batch,
            summary: BatchSummary::from_records(&batch.records),
            unmatched_files: batch
                .unmatched_files
                .iter()
                .map(|f| f.name.as_str())
                .collect(),
            filtered_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, rf: bool, pgfn: bool) -> ClassificationRecord {
        ClassificationRecord {
            company_name: name.to_string(),
            receita_federal_installment: rf,
            pgfn_installment: pgfn,
            source_file_name: "x.pdf".to_string(),
        }
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Sim");
        assert_eq!(yes_no(false), "Não");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[
            record("ACME LTDA", true, false),
            record("Beta Comércio e Serviços", false, true),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Empresa "));
        assert!(lines[0].contains("Parcelamento RF"));
        assert!(lines[2].starts_with("ACME LTDA "));
        assert!(lines[2].contains("| Sim "));
        assert!(lines[2].ends_with("| Não"));
        assert!(lines[3].starts_with("Beta Comércio e Serviços | Não"));
    }

    #[test]
    fn test_render_empty_table_has_header() {
        assert_eq!(render_table(&[]).lines().count(), 2);
    }

    #[test]
    fn test_render_summary() {
        let summary = BatchSummary::from_records(&[record("A", true, true), record("B", false, true)]);
        let text = render_summary(&summary);
        assert!(text.contains("Empresas: 2"));
        assert!(text.contains("Parcelamento RF: 1 sim / 1 não"));
        assert!(text.contains("Parcelamento PGFN: 2 sim / 0 não"));
        assert!(text.contains("Ambos: 1"));
    }

    #[test]
    fn test_render_records_summarizes_filtered_set() {
        let filtered = vec![record("ACME", true, false)];
        let text = render_records(&filtered, &["acme".to_string()], true);

        assert!(text.contains("ACME"));
        assert!(text.contains("Empresas: 1"));
        assert!(text.contains("Parcelamento PGFN: 0 sim / 1 não"));
    }

    #[test]
    fn test_render_records_no_match_lists_terms() {
        let terms = vec!["delta".to_string(), "gama".to_string()];
        assert_eq!(
            render_records(&[], &terms, true),
            "Nenhuma empresa encontrada com os termos: delta, gama\n"
        );
        assert_eq!(
            render_records(&[], &[], true),
            "Nenhuma empresa corresponde aos filtros selecionados.\n"
        );
        assert_eq!(render_records(&[], &terms, false), "Nenhuma empresa identificada.\n");
    }

    #[test]
    fn test_json_report_fields() {
        let mut batch = BatchResult::new();
        batch.push_matched(
            record("ACME", true, false),
            parcelamento::ArchiveFile::new("x.pdf", b"pdf".to_vec()),
        );
        batch.push_unmatched(parcelamento::ArchiveFile::new("orfao.pdf", b"pdf".to_vec()));

        let report = JsonReport::new(&batch, batch.records.clone());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["batchId"], batch.batch_id.as_str());
        assert_eq!(json["records"][0]["companyName"], "ACME");
        assert_eq!(json["summary"]["total"], 1);
        assert_eq!(json["unmatchedFiles"][0], "orfao.pdf");
        assert_eq!(json["filteredRecords"].as_array().unwrap().len(), 1);
    }
}
