//! [`Vfs`] over the local filesystem with zip and rar archives mounted as
//! directories.
//!
//! Opening an archive parses its entry list once and keeps it as a mount
//! until [`Vfs::release`]. Nested archives stay in memory (rar ones on disk,
//! since unrar needs a path), so walking a nested archive inflates it once
//! rather than once per directory.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::rc::Rc;

use ::zip::ZipArchive;

use super::address::{Address, ArchiveKind};
use super::tree::{self, ArchiveEntry, Listing};
use super::{rar, zip, Vfs, VfsError};

/// Default cap on a single entry read out of an archive (64 MiB).
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// How many nested archives of maximum size may be held in memory at once.
const CACHED_ENTRIES: u64 = 4;

/// Where the bytes of a mounted archive live.
enum Container {
    Path(PathBuf),
    Memory(Vec<u8>),
    Spilled(tempfile::NamedTempFile),
}

impl Container {
    fn memory_bytes(&self) -> u64 {
        match self {
            Container::Memory(bytes) => bytes.len() as u64,
            _ => 0,
        }
    }
}

/// An opened archive: its bytes and parsed entry list.
struct Mount {
    kind: ArchiveKind,
    container: Container,
    entries: Vec<ArchiveEntry>,
}

impl Mount {
    fn read_entry(&self, address: &str, inner: &str, limit: u64) -> Result<Vec<u8>, VfsError> {
        match &self.container {
            Container::Path(path) => match self.kind {
                ArchiveKind::Zip => {
                    let file = File::open(path).map_err(|source| io_err(address, source))?;
                    zip::read_entry(&mut ZipArchive::new(file)?, inner, limit)
                }
                ArchiveKind::Rar => rar::read_entry(path, inner, limit),
            },
            Container::Memory(bytes) => {
                zip::read_entry(&mut ZipArchive::new(Cursor::new(bytes.as_slice()))?, inner, limit)
            }
            Container::Spilled(tmp) => rar::read_entry(tmp.path(), inner, limit),
        }
    }
}

/// Mounts by container address, evicted oldest first once the in-memory
/// bytes exceed the budget.
#[derive(Default)]
struct MountCache {
    mounts: HashMap<String, Rc<Mount>>,
    order: VecDeque<String>,
    memory_bytes: u64,
}

impl MountCache {
    fn insert(&mut self, container: String, mount: Rc<Mount>, budget: u64) {
        let size = mount.container.memory_bytes();
        while self.memory_bytes + size > budget {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(evicted) = self.mounts.remove(&oldest) {
                self.memory_bytes -= evicted.container.memory_bytes();
            }
        }
        self.memory_bytes += size;
        self.order.push_back(container.clone());
        self.mounts.insert(container, mount);
    }
}

/// Local files plus browsable archives.
pub struct ArchiveFs {
    max_entry_bytes: u64,
    cache: RefCell<MountCache>,
    mounted: Cell<usize>,
}

impl Default for ArchiveFs {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRY_BYTES)
    }
}

impl fmt::Debug for ArchiveFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveFs")
            .field("max_entry_bytes", &self.max_entry_bytes)
            .field("mounts", &self.cache.borrow().mounts.len())
            .finish()
    }
}

impl ArchiveFs {
    /// `max_entry_bytes` bounds every entry read, including nested archives
    /// that have to be loaded into memory before they can be listed.
    pub fn new(max_entry_bytes: u64) -> Self {
        Self {
            max_entry_bytes,
            cache: RefCell::new(MountCache::default()),
            mounted: Cell::new(0),
        }
    }

    /// Number of archives opened so far, cache hits excluded.
    pub fn mounts_opened(&self) -> usize {
        self.mounted.get()
    }

    fn mount(&self, kind: ArchiveKind, container: &str) -> Result<Rc<Mount>, VfsError> {
        if let Some(mount) = self.cache.borrow().mounts.get(container) {
            return Ok(Rc::clone(mount));
        }

        let data = match Address::parse(container)? {
            Address::Local(path) => {
                if !path.is_file() {
                    return Err(VfsError::NotFound(container.to_string()));
                }
                Container::Path(path)
            }
            Address::Archive { .. } => {
                tracing::debug!(container, "loading nested archive into memory");
                let bytes = self.read_file(container)?;
                match kind {
                    ArchiveKind::Zip => Container::Memory(bytes),
                    ArchiveKind::Rar => Container::Spilled(spill(container, &bytes)?),
                }
            }
        };
        let entries = match (&data, kind) {
            (Container::Path(path), ArchiveKind::Zip) => {
                let file = File::open(path).map_err(|source| io_err(container, source))?;
                zip::entries(&mut ZipArchive::new(file)?)?
            }
            (Container::Memory(bytes), _) => {
                zip::entries(&mut ZipArchive::new(Cursor::new(bytes.as_slice()))?)?
            }
            (Container::Path(path), ArchiveKind::Rar) => rar::entries(path)?,
            (Container::Spilled(tmp), _) => rar::entries(tmp.path())?,
        };

        self.mounted.set(self.mounted.get() + 1);
        let mount = Rc::new(Mount {
            kind,
            container: data,
            entries,
        });
        self.cache.borrow_mut().insert(
            container.to_string(),
            Rc::clone(&mount),
            self.max_entry_bytes.saturating_mul(CACHED_ENTRIES),
        );
        Ok(mount)
    }
}

impl Vfs for ArchiveFs {
    fn exists(&self, address: &str) -> bool {
        match Address::parse(address) {
            Ok(Address::Local(path)) => path.exists(),
            Ok(Address::Archive { kind, container, inner }) => match self.mount(kind, &container) {
                Ok(mount) => {
                    inner.is_empty()
                        || tree::is_file(&mount.entries, &inner)
                        || tree::children(&mount.entries, &inner).is_some()
                }
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    fn make_directories(&self, address: &str) -> Result<(), VfsError> {
        match Address::parse(address)? {
            Address::Local(path) => {
                fs::create_dir_all(&path).map_err(|source| io_err(address, source))
            }
            Address::Archive { .. } => Err(VfsError::ReadOnly(address.to_string())),
        }
    }

    fn list_directory(&self, address: &str) -> Result<Listing, VfsError> {
        match Address::parse(address)? {
            Address::Local(path) => {
                let mut listing = Listing::default();
                let rd = fs::read_dir(&path).map_err(|source| io_err(address, source))?;
                for entry in rd {
                    let entry = entry.map_err(|source| io_err(address, source))?;
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if entry.path().is_dir() {
                        listing.dirs.push(name);
                    } else {
                        listing.files.push(name);
                    }
                }
                Ok(listing)
            }
            Address::Archive { kind, container, inner } => {
                let mount = self.mount(kind, &container)?;
                tree::children(&mount.entries, &inner).ok_or_else(|| VfsError::NotFound(address.to_string()))
            }
        }
    }

    fn read_file(&self, address: &str) -> Result<Vec<u8>, VfsError> {
        match Address::parse(address)? {
            Address::Local(path) => fs::read(&path).map_err(|source| io_err(address, source)),
            Address::Archive { kind, container, inner } => {
                let mount = self.mount(kind, &container)?;
                if !tree::is_file(&mount.entries, &inner) {
                    return Err(VfsError::NotFound(address.to_string()));
                }
                mount.read_entry(address, &inner, self.max_entry_bytes)
            }
        }
    }

    fn release(&self) {
        let mut cache = self.cache.borrow_mut();
        if !cache.mounts.is_empty() {
            tracing::debug!("releasing {} archive mounts", cache.mounts.len());
        }
        *cache = MountCache::default();
    }
}

fn io_err(address: &str, source: std::io::Error) -> VfsError {
    VfsError::Io {
        address: address.to_string(),
        source,
    }
}

fn spill(container: &str, bytes: &[u8]) -> Result<tempfile::NamedTempFile, VfsError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("subgrab-")
        .suffix(".rar")
        .tempfile()
        .map_err(|source| io_err(container, source))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.flush())
        .map_err(|source| io_err(container, source))?;
    Ok(tmp)
}
