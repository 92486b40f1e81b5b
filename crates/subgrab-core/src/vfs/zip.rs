//! Zip backend: entry listing and single-entry reads.

use std::io::{Read, Seek};

use ::zip::ZipArchive;

use super::tree::ArchiveEntry;
use super::VfsError;

pub(crate) fn entries<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<ArchiveEntry>, VfsError> {
    let mut out = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;
        match ArchiveEntry::from_raw(file.name(), file.is_dir()) {
            Some(entry) => out.push(entry),
            None => tracing::warn!(name = file.name(), "skipping unsafe zip entry name"),
        }
    }
    Ok(out)
}

/// Index of the file entry at normalized `path`. Only raw headers are
/// touched, so unreadable siblings do not matter.
fn find_index<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Option<usize>, VfsError> {
    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;
        let matches = ArchiveEntry::from_raw(file.name(), file.is_dir())
            .is_some_and(|e| !e.is_dir && e.path == path);
        if matches {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

/// Read the file entry at normalized `path`, refusing more than `limit` bytes.
pub(crate) fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
    limit: u64,
) -> Result<Vec<u8>, VfsError> {
    let Some(index) = find_index(archive, path)? else {
        return Err(VfsError::NotFound(path.to_string()));
    };
    let file = archive.by_index(index)?;
    if file.size() > limit {
        return Err(VfsError::TooLarge {
            name: path.to_string(),
            limit,
        });
    }
    let mut buf = Vec::with_capacity(file.size() as usize);
    // The declared size can lie; cap the actual read as well.
    file.take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|source| VfsError::Io {
            address: path.to_string(),
            source,
        })?;
    if buf.len() as u64 > limit {
        return Err(VfsError::TooLarge {
            name: path.to_string(),
            limit,
        });
    }
    Ok(buf)
}
