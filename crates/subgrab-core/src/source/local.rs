//! Source backed by a local directory of subtitle files and archives.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{guess_content_type, SearchContext, SubtitleListItem, SubtitleSource};
use crate::blob::DownloadedBlob;
use crate::classify::{self, Classification};

/// Searches one directory (not recursively) by case-insensitive substring.
/// Item ids are file names inside that directory.
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn modified_date(path: &Path) -> String {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| chrono::DateTime::<chrono::Local>::from(t).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl SubtitleSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    fn search(&self, ctx: &SearchContext) -> Result<Vec<SubtitleListItem>> {
        let term = ctx.search_term().to_lowercase();
        tracing::info!("searching {} for {:?}", self.root.display(), term);
        let language = ctx.languages.first().cloned().unwrap_or_default();

        let mut names = Vec::new();
        let rd = fs::read_dir(&self.root)
            .with_context(|| format!("read_dir {}", self.root.display()))?;
        for entry in rd {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if classify::classify(&name) == Classification::Unknown {
                continue;
            }
            if name.to_lowercase().contains(&term) {
                names.push(name);
            }
        }
        names.sort();
        tracing::info!("found {} items", names.len());

        Ok(names
            .into_iter()
            .map(|name| SubtitleListItem {
                name: classify::display_title(&name),
                time: modified_date(&self.root.join(&name)),
                item_id: name,
                language_code: language.clone(),
                language_name: language.clone(),
                language_flag: language.clone(),
                rating: 0,
            })
            .collect())
    }

    fn download(&self, item_id: &str) -> Result<DownloadedBlob> {
        if item_id.is_empty() || classify::file_name(item_id) != item_id || item_id == ".." {
            anyhow::bail!("invalid item id {:?}", item_id);
        }
        let path = self.root.join(item_id);
        let content = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        Ok(DownloadedBlob::new(item_id, guess_content_type(item_id), content))
    }
}
