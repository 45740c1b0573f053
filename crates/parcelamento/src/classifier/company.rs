use std::sync::LazyLock;

use regex::Regex;

/// `CNPJ: DD.DDD.DDD - <name>`; only the 2-3-3 root of the tax id is matched.
static CNPJ_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CNPJ:\s*(\d{2}\.\d{3}\.\d{3})\s*-\s*(.+)").expect("CNPJ header pattern is valid")
});

/// Returns the company name following the first CNPJ header in `text`.
///
/// The capture runs to the end of the line and is trimmed. An all-whitespace
/// capture counts as no match.
pub fn extract_company_name(text: &str) -> Option<String> {
    let captures = CNPJ_HEADER.captures(text)?;
    let name = captures.get(2)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Searches header pages in order, stopping at the first page that yields a name.
pub fn extract_company_name_from_pages<S: AsRef<str>>(pages: &[S]) -> Option<String> {
    pages
        .iter()
        .find_map(|page| extract_company_name(page.as_ref()))
}
