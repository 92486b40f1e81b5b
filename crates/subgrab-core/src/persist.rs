//! Writes downloaded bytes to uniquely named files under a temp directory.
//!
//! Names look like `sub_2026-10-16T14:03:12.123456.srt`. Files are created
//! with create-new semantics; if a name is already taken (two saves in the
//! same microsecond) a `_<n>` suffix is appended after the timestamp.
//! Earlier files in the directory are left alone.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::blob::DownloadedBlob;
use crate::error::PipelineError;

/// Prefix of every file written by this module.
pub const FILE_PREFIX: &str = "sub_";

/// Give up finding a free name after this many suffixes.
const MAX_SUFFIX: u32 = 1000;

/// Save `blob.content` under `base_dir`, keeping the extension of `blob.file_name`.
/// Creates `base_dir` (recursively) if missing. Returns the absolute path written.
pub fn save(blob: &DownloadedBlob, base_dir: &Path) -> Result<PathBuf, PipelineError> {
    tracing::debug!(file = %blob.file_name, dir = %base_dir.display(), "saving download");
    let path = save_bytes(&blob.content, blob.extension(), base_dir)?;
    tracing::info!("file {} saved to {}", blob.file_name, path.display());
    Ok(path)
}

/// Write `content` to a fresh `sub_<timestamp><extension>` file in `base_dir`.
pub fn save_bytes(content: &[u8], extension: &str, base_dir: &Path) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(base_dir).map_err(|source| PipelineError::CreateDir {
        path: base_dir.to_path_buf(),
        source,
    })?;
    let base_dir = std::path::absolute(base_dir).map_err(|source| PipelineError::CreateDir {
        path: base_dir.to_path_buf(),
        source,
    })?;

    let stamp = timestamp();
    let (path, mut file) = create_unique(&base_dir, &stamp, extension)?;
    let written = file
        .write_all(content)
        .and_then(|()| file.sync_all());
    if let Err(source) = written {
        // Do not leave a truncated file behind.
        let _ = fs::remove_file(&path);
        return Err(PipelineError::Write { path, source });
    }
    Ok(path)
}

/// Local ISO-8601 timestamp with microseconds.
fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn create_unique(dir: &Path, stamp: &str, extension: &str) -> Result<(PathBuf, File), PipelineError> {
    let mut suffix = 0u32;
    loop {
        let name = if suffix == 0 {
            format!("{FILE_PREFIX}{stamp}{extension}")
        } else {
            format!("{FILE_PREFIX}{stamp}_{suffix}{extension}")
        };
        let path = dir.join(name);
        match File::options().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && suffix < MAX_SUFFIX => {
                suffix += 1;
            }
            Err(source) => return Err(PipelineError::Write { path, source }),
        }
    }
}
