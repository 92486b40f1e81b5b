//! `subgrab get` – download one item and print the subtitle path.

use anyhow::Result;
use subgrab_core::config::SubgrabConfig;

use super::service;
use crate::cli::SourceArgs;

pub fn run_get(cfg: &SubgrabConfig, args: &SourceArgs, item_id: &str, first: bool) -> Result<()> {
    let svc = service(cfg, args, first)?;
    match svc.download(item_id) {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("no usable subtitle in {}", item_id),
    }
    Ok(())
}
