//! CLI command handlers, one per file.

mod classify;
mod get;
mod load;
mod plugin;
mod search;
mod unpack;

pub use classify::run_classify;
pub use get::run_get;
pub use load::run_load;
pub use plugin::run_plugin;
pub use search::run_search;
pub use unpack::run_unpack;

use anyhow::Result;
use subgrab_core::config::SubgrabConfig;
use subgrab_core::pipeline::SubtitlePipeline;
use subgrab_core::service::SubtitleService;
use subgrab_core::source::{HttpSource, LocalSource, SubtitleSource};

use super::chooser::chooser;
use super::SourceArgs;

fn source(cfg: &SubgrabConfig, args: &SourceArgs) -> Box<dyn SubtitleSource> {
    match &args.dir {
        Some(dir) => Box::new(LocalSource::new(dir)),
        None => Box::new(HttpSource::from_config(cfg)),
    }
}

fn service(cfg: &SubgrabConfig, args: &SourceArgs, first: bool) -> Result<SubtitleService> {
    Ok(SubtitleService::new(
        source(cfg, args),
        SubtitlePipeline::from_config(cfg, chooser(first)),
        cfg.addon_id.clone(),
        cfg.resolve_temp_dir()?,
    ))
}
