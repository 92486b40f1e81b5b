//! Directory view over the flat entry list of an archive.

/// One entry of an archive, path normalized to `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub is_dir: bool,
}

impl ArchiveEntry {
    /// Build an entry from a raw archive name. Returns `None` for names that
    /// are empty, absolute, or climb out of the archive with `..`.
    pub fn from_raw(name: &str, is_dir: bool) -> Option<Self> {
        let unified = name.replace('\\', "/");
        if unified.starts_with('/') {
            return None;
        }
        let mut parts = Vec::new();
        for part in unified.split('/') {
            match part {
                "" | "." => continue,
                ".." => return None,
                p => parts.push(p),
            }
        }
        if parts.is_empty() {
            return None;
        }
        Some(ArchiveEntry {
            path: parts.join("/"),
            is_dir: is_dir || unified.ends_with('/'),
        })
    }
}

/// Children of one directory, names only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

/// Direct children of `dir` (empty for the archive root), in first-seen order.
/// Parent directories without an entry of their own are synthesized.
/// Returns `None` if `dir` does not exist in the archive.
pub(crate) fn children(entries: &[ArchiveEntry], dir: &str) -> Option<Listing> {
    let mut listing = Listing::default();
    let mut found = dir.is_empty();

    for entry in entries {
        let rest = if dir.is_empty() {
            entry.path.as_str()
        } else {
            match entry.path.strip_prefix(dir).and_then(|r| r.strip_prefix('/')) {
                Some(r) => r,
                None => {
                    if entry.path == dir && entry.is_dir {
                        found = true;
                    }
                    continue;
                }
            }
        };
        found = true;
        match rest.split_once('/') {
            Some((child_dir, _)) => push_unique(&mut listing.dirs, child_dir),
            None if entry.is_dir => push_unique(&mut listing.dirs, rest),
            None => push_unique(&mut listing.files, rest),
        }
    }

    found.then_some(listing)
}

/// True if `path` names a file entry in the archive.
pub(crate) fn is_file(entries: &[ArchiveEntry], path: &str) -> bool {
    entries.iter().any(|e| !e.is_dir && e.path == path)
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}
