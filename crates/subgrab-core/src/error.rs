//! Error types shared by the pipeline stages.

use std::io;
use std::path::PathBuf;

use crate::vfs::VfsError;

/// Failure of one pipeline stage. The pipeline logs these and degrades to
/// "no subtitle"; they never reach the host as a panic.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Wrong extension or too few bytes.
    #[error("invalid download {file_name:?} ({content_length} bytes)")]
    InvalidDownload {
        file_name: String,
        content_length: u64,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Vfs(#[from] VfsError),
}
