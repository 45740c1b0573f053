use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::archive::ArchiveFile;
use crate::config::ArchiveCompression;
use crate::error::ArchiveError;
use crate::sanitize;

/// Namespace for files renamed after their company.
pub const RENAMED_DIR: &str = "renomeados";
/// Namespace for files whose company could not be identified.
pub const NOT_FOUND_DIR: &str = "nao_encontrados";

/// Builds the downloadable archive: matched files under `renomeados/`,
/// unmatched files under `nao_encontrados/` with their original names.
pub fn write_output_archive(
    matched: &[ArchiveFile],
    unmatched: &[ArchiveFile],
    compression: ArchiveCompression,
) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(compression.method());

    let mut used = HashSet::new();

    for file in matched {
        let name = sanitize::archive_file_name(&file.name);
        let path = resolve_conflict(&mut used, &format!("{}/{}", RENAMED_DIR, name));
        write_entry(&mut writer, &path, &file.bytes, options)?;
    }

    for file in unmatched {
        let path = resolve_conflict(&mut used, &format!("{}/{}", NOT_FOUND_DIR, file.name));
        write_entry(&mut writer, &path, &file.bytes, options)?;
    }

    let cursor = writer.finish().map_err(ArchiveError::Write)?;
    Ok(cursor.into_inner())
}

fn write_entry(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    path: &str,
    bytes: &[u8],
    options: SimpleFileOptions,
) -> Result<(), ArchiveError> {
    writer
        .start_file(path, options)
        .map_err(ArchiveError::Write)?;
    writer
        .write_all(bytes)
        .map_err(|source| ArchiveError::WriteEntry {
            name: path.to_string(),
            source,
        })
}

/// Returns `path`, or `base_N.ext` with the lowest N >= 2 not yet taken.
fn resolve_conflict(used: &mut HashSet<String>, path: &str) -> String {
    if used.insert(path.to_string()) {
        return path.to_string();
    }

    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (base, ext) = match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => path.split_at(file_start + dot),
        _ => (path, ""),
    };

    let mut counter = 2;
    loop {
        let candidate = format!("{}_{}{}", base, counter, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}
