//! Rar backend on top of libunrar. Works on files only, so in-memory rar
//! archives are spilled to a temp file by the caller.

use std::path::Path;

use super::tree::ArchiveEntry;
use super::VfsError;

fn rar_err<E: std::fmt::Debug>(e: E) -> VfsError {
    VfsError::Rar(format!("{:?}", e))
}

pub(crate) fn entries(path: &Path) -> Result<Vec<ArchiveEntry>, VfsError> {
    let listing = unrar::Archive::new(path)
        .open_for_listing()
        .map_err(rar_err)?;
    let mut out = Vec::new();
    for header in listing {
        let header = header.map_err(rar_err)?;
        let name = header.filename.to_string_lossy();
        match ArchiveEntry::from_raw(&name, header.is_directory()) {
            Some(entry) => out.push(entry),
            None => tracing::warn!(name = %name, "skipping unsafe rar entry name"),
        }
    }
    Ok(out)
}

pub(crate) fn read_entry(path: &Path, entry_path: &str, limit: u64) -> Result<Vec<u8>, VfsError> {
    let mut archive = unrar::Archive::new(path)
        .open_for_processing()
        .map_err(rar_err)?;
    while let Some(header) = archive.read_header().map_err(rar_err)? {
        let entry = header.entry();
        let name = entry.filename.to_string_lossy();
        let matches = ArchiveEntry::from_raw(&name, entry.is_directory())
            .is_some_and(|e| !e.is_dir && e.path == entry_path);
        if !matches {
            archive = header.skip().map_err(rar_err)?;
            continue;
        }
        if entry.unpacked_size > limit {
            return Err(VfsError::TooLarge {
                name: entry_path.to_string(),
                limit,
            });
        }
        let (data, _rest) = header.read().map_err(rar_err)?;
        // The header size can lie; check what was actually unpacked.
        if data.len() as u64 > limit {
            return Err(VfsError::TooLarge {
                name: entry_path.to_string(),
                limit,
            });
        }
        return Ok(data);
    }
    Err(VfsError::NotFound(entry_path.to_string()))
}
