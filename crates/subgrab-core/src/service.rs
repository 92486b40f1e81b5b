//! Plugin service: a subtitle source composed with the download pipeline.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::pipeline::SubtitlePipeline;
use crate::router::{self, Action, RouterError, SearchRequest};
use crate::source::{SearchContext, SubtitleListItem, SubtitleSource, VideoMetadata};

/// One row of a search result listing as the host displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    /// Language name.
    pub label: String,
    /// Subtitle name.
    pub label2: String,
    /// Rating icon, `0`..=`5`.
    pub icon: String,
    /// Language flag.
    pub thumb: String,
    /// `plugin://<addon_id>/?action=download&item_id=...`
    pub url: String,
}

/// What a dispatched request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listing(Vec<ListingEntry>),
    /// Local subtitle file, or `None` when nothing usable was downloaded.
    Subtitle(Option<PathBuf>),
}

pub struct SubtitleService {
    source: Box<dyn SubtitleSource>,
    pipeline: SubtitlePipeline,
    addon_id: String,
    temp_dir: PathBuf,
}

impl SubtitleService {
    pub fn new(
        source: Box<dyn SubtitleSource>,
        pipeline: SubtitlePipeline,
        addon_id: impl Into<String>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            pipeline,
            addon_id: addon_id.into(),
            temp_dir: temp_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Raw search results of the source.
    pub fn search(&self, ctx: &SearchContext) -> anyhow::Result<Vec<SubtitleListItem>> {
        self.source.search(ctx)
    }

    /// Search and map results to host listing rows.
    pub fn search_listing(&self, ctx: &SearchContext) -> Vec<ListingEntry> {
        match self.source.search(ctx) {
            Ok(items) => items.iter().map(|item| self.listing_entry(item)).collect(),
            Err(e) => {
                tracing::error!("{} search failed: {:#}", self.source.name(), e);
                Vec::new()
            }
        }
    }

    fn listing_entry(&self, item: &SubtitleListItem) -> ListingEntry {
        ListingEntry {
            label: item.language_name.clone(),
            label2: item.name.clone(),
            icon: item.rating_icon(),
            thumb: item.language_flag.clone(),
            url: format!(
                "plugin://{}/?{}",
                self.addon_id,
                router::download_query(&item.item_id)
            ),
        }
    }

    /// Download `item_id` and run it through the pipeline.
    pub fn download(&self, item_id: &str) -> Option<PathBuf> {
        let blob = match self.source.download(item_id) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!("failed to download file with item_id {}: {:#}", item_id, e);
                return None;
            }
        };
        let path = self.pipeline.load(&blob, &self.temp_dir);
        if path.is_none() {
            tracing::error!("failed to load file with item_id: {}", item_id);
        }
        path
    }

    /// Route a plugin query string. `video` describes what is playing.
    pub fn dispatch(&self, paramstring: &str, video: VideoMetadata) -> Result<Outcome, RouterError> {
        let params = router::param_dict(paramstring);
        tracing::info!("request: {:?}", params);
        match Action::from_params(&params) {
            Ok(Action::Search(req)) => Ok(Outcome::Listing(self.search_listing(&search_context(req, video)))),
            Ok(Action::Download { item_id }) => Ok(Outcome::Subtitle(self.download(&item_id))),
            Err(e) => {
                tracing::error!("cannot route request: {}", e);
                Err(e)
            }
        }
    }
}

fn search_context(req: SearchRequest, video: VideoMetadata) -> SearchContext {
    SearchContext {
        languages: req.languages,
        preferred_languages: req.preferred_languages,
        search_string: req.search_string,
        video,
    }
}
