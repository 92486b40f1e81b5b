//! Breadth-first search for subtitle files inside an archive.
//!
//! The frontier is an explicit queue, never recursion, since nesting depth is
//! chosen by whoever built the archive. Archives found inside the archive are
//! opened through the virtual filesystem and queued as new roots until
//! `max_archive_depth` is reached.

use std::collections::VecDeque;

use crate::classify::{self, Classification};
use crate::config::SubgrabConfig;
use crate::vfs::{self, Vfs};

/// A subtitle file found during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCandidate {
    /// `"[ext]name"`, shown to the user when choosing.
    pub display_title: String,
    /// VFS address of the file.
    pub full_path: String,
}

/// Traversal knobs.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Directory names that are never descended into.
    pub skip_dirs: Vec<String>,
    /// How many archive-in-archive levels are opened below the root archive.
    pub max_archive_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            skip_dirs: vec!["__MACOSX".to_string(), ".git".to_string()],
            max_archive_depth: 4,
        }
    }
}

impl From<&SubgrabConfig> for WalkOptions {
    fn from(cfg: &SubgrabConfig) -> Self {
        Self {
            skip_dirs: cfg.skip_dirs.clone(),
            max_archive_depth: cfg.max_archive_depth,
        }
    }
}

struct Frontier {
    segments: Vec<String>,
    depth: usize,
}

/// Collect every subtitle file reachable inside the archive at `archive_path`.
///
/// Only `.zip` and `.rar` can be opened; anything else yields an empty result.
/// Unlistable directories or corrupt nested archives are logged and skipped,
/// so the result may be partial but the call never fails.
pub fn unpack(vfs: &dyn Vfs, archive_path: &str, opts: &WalkOptions) -> Vec<SubtitleCandidate> {
    let file_name = classify::file_name(archive_path);
    if classify::classify(archive_path) != Classification::AccessibleArchive {
        tracing::error!("cannot open archive type: {}", file_name);
        return Vec::new();
    }
    let Some(root) = vfs.translate_archive_scheme(archive_path) else {
        tracing::error!("no archive address for {}", file_name);
        return Vec::new();
    };
    tracing::debug!("searching archive: {}", root);

    let mut found = Vec::new();
    let mut queue = VecDeque::from([Frontier {
        segments: vec![root],
        depth: 0,
    }]);

    while let Some(Frontier { segments, depth }) = queue.pop_front() {
        let base = vfs::join(&segments);
        let listing = match vfs.list_directory(&base) {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!("cannot list {}: {}", base, e);
                continue;
            }
        };

        for dir in listing.dirs {
            if opts.skip_dirs.iter().any(|s| *s == dir) {
                continue;
            }
            let mut next = segments.clone();
            next.push(dir);
            queue.push_back(Frontier { segments: next, depth });
        }

        for file in listing.files {
            let full_path = vfs::join(&[base.as_str(), file.as_str()]);
            if classify::has_subtitle_suffix(&file) {
                tracing::debug!("found subtitle: {}", full_path);
                found.push(SubtitleCandidate {
                    display_title: classify::display_title(&file),
                    full_path,
                });
            } else if classify::classify(&file) == Classification::AccessibleArchive {
                if depth >= opts.max_archive_depth {
                    tracing::warn!("nested archive too deep, skipped: {}", full_path);
                    continue;
                }
                if let Some(nested) = vfs.translate_archive_scheme(&full_path) {
                    tracing::debug!("queueing nested archive: {}", full_path);
                    queue.push_back(Frontier {
                        segments: vec![nested],
                        depth: depth + 1,
                    });
                }
            }
        }
    }

    tracing::info!("in total: {} subtitles", found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::{Listing, VfsError};
    use std::collections::HashMap;

    /// In-memory tree keyed by address.
    #[derive(Default)]
    struct FakeVfs {
        dirs: HashMap<String, Listing>,
    }

    impl FakeVfs {
        fn dir(mut self, address: &str, dirs: &[&str], files: &[&str]) -> Self {
            self.dirs.insert(
                address.to_string(),
                Listing {
                    dirs: dirs.iter().map(|s| s.to_string()).collect(),
                    files: files.iter().map(|s| s.to_string()).collect(),
                },
            );
            self
        }
    }

    impl Vfs for FakeVfs {
        fn exists(&self, address: &str) -> bool {
            self.dirs.contains_key(address)
        }
        fn make_directories(&self, address: &str) -> Result<(), VfsError> {
            Err(VfsError::ReadOnly(address.to_string()))
        }
        fn list_directory(&self, address: &str) -> Result<Listing, VfsError> {
            self.dirs
                .get(address)
                .cloned()
                .ok_or_else(|| VfsError::NotFound(address.to_string()))
        }
        fn read_file(&self, address: &str) -> Result<Vec<u8>, VfsError> {
            Err(VfsError::NotFound(address.to_string()))
        }
    }

    const ROOT: &str = "zip://%2Ftmp%2Fa.zip";

    fn titles(c: &[SubtitleCandidate]) -> Vec<&str> {
        c.iter().map(|c| c.display_title.as_str()).collect()
    }

    #[test]
    fn empty_archive() {
        let vfs = FakeVfs::default().dir(ROOT, &[], &[]);
        assert!(unpack(&vfs, "/tmp/a.zip", &WalkOptions::default()).is_empty());
    }

    #[test]
    fn top_level_files_in_listing_order() {
        let vfs = FakeVfs::default().dir(ROOT, &[], &["a.srt", "notes.txt", "b.ass"]);
        let found = unpack(&vfs, "/tmp/a.zip", &WalkOptions::default());
        assert_eq!(titles(&found), vec!["[srt]a.srt", "[ass]b.ass"]);
        assert_eq!(found[0].full_path, format!("{ROOT}/a.srt"));
    }

    #[test]
    fn breadth_first_and_skips_metadata_dirs() {
        let vfs = FakeVfs::default()
            .dir(ROOT, &["__MACOSX", "sub", ".git"], &["top.ssa"])
            .dir(&format!("{ROOT}/sub"), &["deeper"], &["mid.srt"])
            .dir(&format!("{ROOT}/sub/deeper"), &[], &["low.sub"])
            .dir(&format!("{ROOT}/__MACOSX"), &[], &["._top.ssa"])
            .dir(&format!("{ROOT}/.git"), &[], &["x.srt"]);
        let found = unpack(&vfs, "/tmp/a.zip", &WalkOptions::default());
        assert_eq!(titles(&found), vec!["[ssa]top.ssa", "[srt]mid.srt", "[sub]low.sub"]);
        assert_eq!(found[2].full_path, format!("{ROOT}/sub/deeper/low.sub"));
    }

    #[test]
    fn inaccessible_archive_yields_nothing() {
        let vfs = FakeVfs::default();
        assert!(unpack(&vfs, "/tmp/a.7z", &WalkOptions::default()).is_empty());
        assert!(unpack(&vfs, "/tmp/a.srt", &WalkOptions::default()).is_empty());
    }

    #[test]
    fn unlistable_subdir_keeps_partial_result() {
        let vfs = FakeVfs::default().dir(ROOT, &["broken"], &["a.srt"]);
        let found = unpack(&vfs, "/tmp/a.zip", &WalkOptions::default());
        assert_eq!(titles(&found), vec!["[srt]a.srt"]);
    }

    #[test]
    fn nested_archive_depth_limit() {
        let nested_path = format!("{ROOT}/inner.zip");
        let nested_root = crate::vfs::translate_archive_scheme(&nested_path).unwrap();
        let vfs = FakeVfs::default()
            .dir(ROOT, &[], &["inner.zip", "outer.srt"])
            .dir(&nested_root, &[], &["inner.ass"]);

        let found = unpack(&vfs, "/tmp/a.zip", &WalkOptions::default());
        assert_eq!(titles(&found), vec!["[srt]outer.srt", "[ass]inner.ass"]);

        let shallow = WalkOptions {
            max_archive_depth: 0,
            ..WalkOptions::default()
        };
        let found = unpack(&vfs, "/tmp/a.zip", &shallow);
        assert_eq!(titles(&found), vec!["[srt]outer.srt"]);
    }
}
