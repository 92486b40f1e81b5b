//! `subgrab unpack` – list subtitles inside an archive.

use anyhow::Result;
use subgrab_core::config::SubgrabConfig;
use subgrab_core::vfs::ArchiveFs;
use subgrab_core::walker::{self, WalkOptions};

pub fn run_unpack(cfg: &SubgrabConfig, archive: &str) -> Result<()> {
    let vfs = ArchiveFs::new(cfg.max_entry_bytes);
    let candidates = walker::unpack(&vfs, archive, &WalkOptions::from(cfg));
    if candidates.is_empty() {
        println!("No subtitles found.");
    }
    for c in candidates {
        println!("{:<40} {}", c.display_title, c.full_path);
    }
    Ok(())
}
