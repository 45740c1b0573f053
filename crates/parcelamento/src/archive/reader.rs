use std::io::{Cursor, Read};

use tracing::debug;

use crate::archive::ArchiveFile;
use crate::error::ArchiveError;

/// An uploaded archive held in memory as a flat list of named files.
#[derive(Debug, Clone, Default)]
pub struct InputArchive {
    entries: Vec<ArchiveFile>,
}

impl InputArchive {
    pub fn from_entries(entries: Vec<ArchiveFile>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ArchiveFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Splits the archive into its PDF entries and the number of other entries.
    pub fn into_pdf_entries(self) -> (Vec<ArchiveFile>, usize) {
        let total = self.entries.len();
        let pdfs: Vec<ArchiveFile> = self.entries.into_iter().filter(|e| e.is_pdf()).collect();
        let ignored = total - pdfs.len();
        (pdfs, ignored)
    }
}

/// Reads every file entry of a zip archive. Directory entries are skipped.
///
/// Any failure here is fatal for the batch: nothing is returned partially.
pub fn read_archive(bytes: &[u8]) -> Result<InputArchive, ArchiveError> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::Read)?;

    let mut entries = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let mut file = zip
            .by_index(index)
            .map_err(|source| ArchiveError::OpenEntry { index, source })?;

        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        // Declared sizes are untrusted; never reserve more than the upload.
        let reserve = file.size().min(bytes.len() as u64) as usize;
        let mut data = Vec::with_capacity(reserve);
        file.read_to_end(&mut data)
            .map_err(|source| ArchiveError::ReadEntry {
                name: name.clone(),
                source,
            })?;

        entries.push(ArchiveFile::new(name, data));
    }

    debug!(entries = entries.len(), "Read input archive");
    Ok(InputArchive::from_entries(entries))
}
