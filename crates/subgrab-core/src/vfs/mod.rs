//! Virtual filesystem: local paths plus browsable archive contents.
//!
//! An address is either a plain local path or an archive address
//! `<scheme>://<encoded container>/<inner path>`, where the container decodes
//! to the address of the archive file itself. Because a container may itself
//! be an archive address, archives nested in archives are reachable without
//! extracting anything to disk.
//!
//! Only listing and reading single entries are supported; an archive is never
//! unpacked as a whole.

mod address;
mod archive_fs;
mod rar;
mod tree;
mod zip;

use std::io;

pub use address::{join, translate_archive_scheme, Address, ArchiveKind};
pub use archive_fs::{ArchiveFs, DEFAULT_MAX_ENTRY_BYTES};
pub use tree::{ArchiveEntry, Listing};

/// Errors raised by a [`Vfs`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    #[error("unsupported address scheme in {0:?}")]
    UnsupportedScheme(String),

    #[error("malformed archive address {0:?}")]
    MalformedAddress(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0} is read-only")]
    ReadOnly(String),

    #[error("entry {name} is larger than {limit} bytes")]
    TooLarge { name: String, limit: u64 },

    #[error("I/O error on {address}: {source}")]
    Io {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("zip: {0}")]
    Zip(#[from] ::zip::result::ZipError),

    #[error("rar: {0}")]
    Rar(String),
}

/// Filesystem operations the pipeline needs from its host.
pub trait Vfs {
    fn exists(&self, address: &str) -> bool;

    fn make_directories(&self, address: &str) -> Result<(), VfsError>;

    /// Direct children of a directory (or archive directory), in listing order.
    fn list_directory(&self, address: &str) -> Result<Listing, VfsError>;

    /// Archive address for the archive file at `path`; `None` when its
    /// extension is not browsable.
    fn translate_archive_scheme(&self, path: &str) -> Option<String> {
        translate_archive_scheme(path)
    }

    /// Contents of a single file.
    fn read_file(&self, address: &str) -> Result<Vec<u8>, VfsError>;

    /// Drop state kept between calls, such as opened archives.
    fn release(&self) {}
}
