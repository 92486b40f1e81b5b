//! `subgrab plugin` – handle a host query string like a subtitle add-on.

use anyhow::Result;
use subgrab_core::config::SubgrabConfig;
use subgrab_core::service::Outcome;
use subgrab_core::source::VideoMetadata;

use super::service;
use crate::cli::SourceArgs;

pub fn run_plugin(
    cfg: &SubgrabConfig,
    args: &SourceArgs,
    paramstring: &str,
    video: VideoMetadata,
    first: bool,
    json: bool,
) -> Result<()> {
    let svc = service(cfg, args, first)?;
    match svc.dispatch(paramstring, video)? {
        Outcome::Listing(rows) if json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Outcome::Listing(rows) => {
            for r in rows {
                println!("{}\t{}\t{}\t{}", r.label, r.label2, r.icon, r.url);
            }
        }
        Outcome::Subtitle(Some(path)) => println!("{}", path.display()),
        Outcome::Subtitle(None) => anyhow::bail!("no usable subtitle"),
    }
    Ok(())
}
