//! Helpers for turning untrusted names into archive paths and span fields.

/// Makes a company-derived file name safe to use as a single archive entry.
///
/// Path separators would otherwise create nested folders inside `renomeados/`.
pub fn archive_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Returns only the last path component of an archive entry name.
///
/// Used for span fields so logs show the file without its folder layout.
pub fn display_name(entry_name: &str) -> &str {
    let trimmed = entry_name.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None if trimmed.is_empty() => "<unknown>",
        None => trimmed,
    }
}
