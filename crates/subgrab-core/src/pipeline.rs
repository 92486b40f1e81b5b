//! Download handling: validate, save, unpack, choose, hand back a local file.
//!
//! Every failure is logged and turns into "no subtitle"; nothing here panics
//! or propagates an error past [`SubtitlePipeline::load`].

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::blob::DownloadedBlob;
use crate::classify::{self, Classification};
use crate::config::SubgrabConfig;
use crate::error::PipelineError;
use crate::persist;
use crate::select::{self, Chooser};
use crate::vfs::{ArchiveFs, Vfs};
use crate::walker::{self, SubtitleCandidate, WalkOptions};

/// Default pause between saving an archive and opening it.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// The reusable download-and-unpack pipeline. Sources only produce blobs;
/// everything after that happens here.
pub struct SubtitlePipeline {
    vfs: Box<dyn Vfs>,
    chooser: Box<dyn Chooser>,
    walk: WalkOptions,
    settle_delay: Duration,
}

impl SubtitlePipeline {
    pub fn new(vfs: Box<dyn Vfs>, chooser: Box<dyn Chooser>) -> Self {
        Self {
            vfs,
            chooser,
            walk: WalkOptions::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Pipeline over [`ArchiveFs`] with limits taken from `cfg`.
    pub fn from_config(cfg: &SubgrabConfig, chooser: Box<dyn Chooser>) -> Self {
        Self {
            vfs: Box::new(ArchiveFs::new(cfg.max_entry_bytes)),
            chooser,
            walk: WalkOptions::from(cfg),
            settle_delay: cfg.settle_delay(),
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_walk_options(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    pub fn vfs(&self) -> &dyn Vfs {
        self.vfs.as_ref()
    }

    /// Turn a downloaded blob into a local subtitle file under `tmp_dir`.
    /// Returns `None` when the download is unusable or holds no subtitle.
    pub fn load(&self, blob: &DownloadedBlob, tmp_dir: &Path) -> Option<PathBuf> {
        match self.try_load(blob, tmp_dir) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("load failed for {}: {}", blob.file_name, e);
                None
            }
        }
    }

    /// Like [`load`](Self::load) but reports why a stage failed.
    /// `Ok(None)` means the download was fine but contained no usable subtitle.
    pub fn try_load(&self, blob: &DownloadedBlob, tmp_dir: &Path) -> Result<Option<PathBuf>, PipelineError> {
        let result = self.run(blob, tmp_dir);
        self.vfs.release();
        result
    }

    fn run(&self, blob: &DownloadedBlob, tmp_dir: &Path) -> Result<Option<PathBuf>, PipelineError> {
        if !blob.is_valid() {
            tracing::error!("invalid file: {:?}", blob);
            return Err(PipelineError::InvalidDownload {
                file_name: blob.file_name.clone(),
                content_length: blob.content_length,
            });
        }

        let stored = persist::save(blob, tmp_dir)?;

        match blob.classification() {
            Classification::Subtitle => {
                tracing::info!("single sub file: {}", stored.display());
                Ok(Some(stored))
            }
            c if c.is_archive() => {
                // The archive backends reopen the file by path; give the host
                // storage a moment before doing so.
                thread::sleep(self.settle_delay);
                let candidates = walker::unpack(self.vfs(), &stored.to_string_lossy(), &self.walk);
                tracing::debug!("list of sub files in archive: {:?}", candidates);
                tracing::debug!(
                    "first two bytes of archive: {:?}",
                    &blob.content[..blob.content.len().min(2)]
                );
                match select::resolve(candidates, self.chooser.as_ref()) {
                    Some(chosen) => self.materialize(&chosen, tmp_dir).map(Some),
                    None => {
                        tracing::warn!("no subtitle found in {}", blob.file_name);
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    /// Copy the chosen archive entry into `tmp_dir` as a standalone file.
    fn materialize(&self, chosen: &SubtitleCandidate, tmp_dir: &Path) -> Result<PathBuf, PipelineError> {
        let data = self.vfs.read_file(&chosen.full_path)?;
        let path = persist::save_bytes(&data, classify::extension(&chosen.full_path), tmp_dir)?;
        tracing::info!("extracted {} to {}", chosen.full_path, path.display());
        Ok(path)
    }
}
