//! Integration test: rar archives through the virtual filesystem, the walker
//! and the pipeline, including a rar nested inside a zip.
//!
//! `data/subs.rar` is a stored (uncompressed) RAR 4 archive:
//! `movie.srt`, `readme.txt`, `extra/` and `extra/episode.ass`.

mod common;

use std::path::{Path, PathBuf};
use std::time::Duration;

use common::fixtures::zip_bytes;
use subgrab_core::blob::DownloadedBlob;
use subgrab_core::pipeline::SubtitlePipeline;
use subgrab_core::select::FirstChoice;
use subgrab_core::vfs::{join, translate_archive_scheme, ArchiveFs, Vfs, VfsError};
use subgrab_core::walker::{self, WalkOptions};
use tempfile::tempdir;

const SUBS_RAR: &[u8] = include_bytes!("data/subs.rar");
const MOVIE_SRT: &[u8] = b"1\n00:00:01,000 --> 00:00:02,000\nhello from rar\n\n";
const EPISODE_ASS: &[u8] = b"[Script Info]\nTitle: episode\nScriptType: v4.00+\n";

fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn lists_rar_root_and_subdir() {
    let dir = tempdir().unwrap();
    let path = write_fixture(dir.path(), "subs.rar", SUBS_RAR);
    let vfs = ArchiveFs::default();
    let root = translate_archive_scheme(&path.to_string_lossy()).unwrap();
    assert!(root.starts_with("rar://"));

    let listing = vfs.list_directory(&root).unwrap();
    assert_eq!(listing.files, vec!["movie.srt", "readme.txt"]);
    assert_eq!(listing.dirs, vec!["extra"]);

    let extra = vfs.list_directory(&join(&[root.as_str(), "extra"])).unwrap();
    assert_eq!(extra.files, vec!["episode.ass"]);
    assert!(extra.dirs.is_empty());
    assert!(vfs.exists(&join(&[root.as_str(), "extra", "episode.ass"])));
}

#[test]
fn reads_rar_entries() {
    let dir = tempdir().unwrap();
    let path = write_fixture(dir.path(), "subs.rar", SUBS_RAR);
    let vfs = ArchiveFs::default();
    let root = translate_archive_scheme(&path.to_string_lossy()).unwrap();

    assert_eq!(vfs.read_file(&join(&[root.as_str(), "movie.srt"])).unwrap(), MOVIE_SRT);
    assert_eq!(
        vfs.read_file(&join(&[root.as_str(), "extra", "episode.ass"])).unwrap(),
        EPISODE_ASS
    );
    assert!(matches!(
        vfs.read_file(&join(&[root.as_str(), "missing.srt"])),
        Err(VfsError::NotFound(_))
    ));
}

#[test]
fn rar_entry_size_limit() {
    let dir = tempdir().unwrap();
    let path = write_fixture(dir.path(), "subs.rar", SUBS_RAR);
    let vfs = ArchiveFs::new(16);
    let root = translate_archive_scheme(&path.to_string_lossy()).unwrap();
    assert!(matches!(
        vfs.read_file(&join(&[root.as_str(), "movie.srt"])),
        Err(VfsError::TooLarge { limit: 16, .. })
    ));
}

#[test]
fn walker_finds_rar_subtitles() {
    let dir = tempdir().unwrap();
    let path = write_fixture(dir.path(), "subs.rar", SUBS_RAR);
    let found = walker::unpack(&ArchiveFs::default(), &path.to_string_lossy(), &WalkOptions::default());
    let titles: Vec<&str> = found.iter().map(|c| c.display_title.as_str()).collect();
    assert_eq!(titles, vec!["[srt]movie.srt", "[ass]episode.ass"]);
}

#[test]
fn rar_nested_in_zip_is_spilled_and_read() {
    let dir = tempdir().unwrap();
    let outer = zip_bytes(&[("pack/", b""), ("pack/subs.rar", SUBS_RAR)]);
    let path = write_fixture(dir.path(), "outer.zip", &outer);
    let vfs = ArchiveFs::default();

    let found = walker::unpack(&vfs, &path.to_string_lossy(), &WalkOptions::default());
    let titles: Vec<&str> = found.iter().map(|c| c.display_title.as_str()).collect();
    assert_eq!(titles, vec!["[srt]movie.srt", "[ass]episode.ass"]);
    assert!(found[1].full_path.starts_with("rar://zip"));

    assert_eq!(vfs.read_file(&found[1].full_path).unwrap(), EPISODE_ASS);
    assert_eq!(vfs.mounts_opened(), 2);
}

#[test]
fn rar_download_loads_first_subtitle() {
    let tmp = tempdir().unwrap();
    let blob = DownloadedBlob::new("subs.rar", "application/vnd.rar", SUBS_RAR.to_vec());
    let pipeline = SubtitlePipeline::new(Box::new(ArchiveFs::default()), Box::new(FirstChoice))
        .with_settle_delay(Duration::ZERO);
    let path = pipeline.load(&blob, tmp.path()).expect("subtitle");
    assert_eq!(path.extension().unwrap(), "srt");
    assert_eq!(std::fs::read(path).unwrap(), MOVIE_SRT);
}
