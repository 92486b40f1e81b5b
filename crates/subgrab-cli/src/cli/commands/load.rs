//! `subgrab load` – run a local file through the pipeline.

use anyhow::{Context, Result};
use std::path::Path;
use subgrab_core::blob::DownloadedBlob;
use subgrab_core::config::SubgrabConfig;
use subgrab_core::pipeline::SubtitlePipeline;
use subgrab_core::source::guess_content_type;

use crate::cli::chooser::chooser;

pub fn run_load(cfg: &SubgrabConfig, file: &Path, first: bool) -> Result<()> {
    let content = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let blob = DownloadedBlob::new(name.as_str(), guess_content_type(&name), content);

    let tmp_dir = cfg.resolve_temp_dir()?;
    let pipeline = SubtitlePipeline::from_config(cfg, chooser(first));
    match pipeline.try_load(&blob, &tmp_dir)? {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("no usable subtitle in {}", file.display()),
    }
    Ok(())
}
