//! Subtitle sources: anything that can search for subtitles and download one.
//!
//! A source only produces search results and [`DownloadedBlob`]s. Validation,
//! unpacking and selection stay in [`crate::pipeline`], so a new source cannot
//! change how downloads are handled.

mod filename;
mod http;
mod local;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::blob::DownloadedBlob;
use crate::classify::{self, Classification};

pub use filename::derive_filename;
pub use http::HttpSource;
pub use local::LocalSource;

/// Metadata of the video being played, supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub original_title: String,
    pub tvshow_title: String,
    pub year: String,
    pub season: String,
    pub episode: String,
}

/// Everything a search needs, passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchContext {
    pub languages: Vec<String>,
    pub preferred_languages: Vec<String>,
    /// Set when the user typed a search string (manual search).
    pub search_string: Option<String>,
    pub video: VideoMetadata,
}

impl SearchContext {
    pub fn is_manual_search(&self) -> bool {
        self.search_string.is_some()
    }

    /// The manual search string, else the TV show title, else the title.
    pub fn search_term(&self) -> &str {
        if let Some(s) = &self.search_string {
            return s;
        }
        if !self.video.tvshow_title.is_empty() {
            &self.video.tvshow_title
        } else {
            &self.video.title
        }
    }
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleListItem {
    pub name: String,
    /// Opaque id handed back to [`SubtitleSource::download`].
    pub item_id: String,
    pub time: String,
    pub language_code: String,
    pub language_name: String,
    pub language_flag: String,
    pub rating: u32,
}

impl SubtitleListItem {
    pub const MAX_RATING: u32 = 5;

    /// Rating icon shown by the host, clamped to `MAX_RATING`.
    pub fn rating_icon(&self) -> String {
        self.rating.min(Self::MAX_RATING).to_string()
    }
}

/// A subtitle website or other origin of subtitle files.
pub trait SubtitleSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn search(&self, ctx: &SearchContext) -> Result<Vec<SubtitleListItem>>;

    fn download(&self, item_id: &str) -> Result<DownloadedBlob>;
}

/// Content type guessed from a filename, for sources without headers.
pub fn guess_content_type(file_name: &str) -> &'static str {
    match classify::extension(file_name) {
        ".zip" => "application/zip",
        ".rar" => "application/vnd.rar",
        ".7z" => "application/x-7z-compressed",
        _ => match classify::classify(file_name) {
            Classification::Subtitle => "text/plain",
            _ => "application/octet-stream",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(search: Option<&str>, tvshow: &str, title: &str) -> SearchContext {
        SearchContext {
            search_string: search.map(str::to_string),
            video: VideoMetadata {
                tvshow_title: tvshow.to_string(),
                title: title.to_string(),
                ..VideoMetadata::default()
            },
            ..SearchContext::default()
        }
    }

    #[test]
    fn search_term_precedence() {
        assert_eq!(ctx(Some("wandering earth"), "Show", "Title").search_term(), "wandering earth");
        assert_eq!(ctx(None, "Show", "Title").search_term(), "Show");
        assert_eq!(ctx(None, "", "Title").search_term(), "Title");
        assert!(!ctx(None, "", "Title").is_manual_search());
    }

    #[test]
    fn rating_icon_is_clamped() {
        let mut item = SubtitleListItem {
            name: "[srt]a.srt".to_string(),
            item_id: "a.srt".to_string(),
            time: String::new(),
            language_code: "en".to_string(),
            language_name: "English".to_string(),
            language_flag: "en".to_string(),
            rating: 3,
        };
        assert_eq!(item.rating_icon(), "3");
        item.rating = 9;
        assert_eq!(item.rating_icon(), "5");
    }

    #[test]
    fn content_type_guess() {
        assert_eq!(guess_content_type("a.zip"), "application/zip");
        assert_eq!(guess_content_type("a.srt"), "text/plain");
        assert_eq!(guess_content_type("a.bin"), "application/octet-stream");
    }
}
