//! `subgrab search` – list matching subtitles.

use anyhow::Result;
use subgrab_core::config::SubgrabConfig;
use subgrab_core::source::SearchContext;

use super::source;
use crate::cli::SourceArgs;

pub fn run_search(
    cfg: &SubgrabConfig,
    args: &SourceArgs,
    term: &str,
    languages: Vec<String>,
    json: bool,
) -> Result<()> {
    let ctx = SearchContext {
        languages,
        search_string: Some(term.to_string()),
        ..SearchContext::default()
    };
    let items = source(cfg, args).search(&ctx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No subtitles found.");
    } else {
        println!("{:<8} {:<10} {:<6} {}", "LANG", "DATE", "RATING", "NAME / ITEM ID");
        for item in items {
            println!(
                "{:<8} {:<10} {:<6} {}",
                item.language_code,
                if item.time.is_empty() { "-" } else { item.time.as_str() },
                item.rating_icon(),
                item.name
            );
            println!("{:<26} {}", "", item.item_id);
        }
    }
    Ok(())
}
