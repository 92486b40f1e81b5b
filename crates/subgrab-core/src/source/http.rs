//! Direct-URL source: the search term is a link to a subtitle or archive,
//! downloaded with a single curl GET.

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use super::{derive_filename, SearchContext, SubtitleListItem, SubtitleSource};
use crate::blob::DownloadedBlob;
use crate::classify;
use crate::config::{HttpConfig, SubgrabConfig};
use crate::vfs::DEFAULT_MAX_ENTRY_BYTES;

/// Response headers the source cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseMeta {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub content_disposition: Option<String>,
}

/// Parse header lines of the last response in a redirect chain.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();
    for line in lines {
        let line = line.trim();
        if line.starts_with("HTTP/") {
            // a new response begins (redirect hop); forget the previous one
            meta = ResponseMeta::default();
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-type") {
            meta.content_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-length") {
            meta.content_length = value.parse().ok();
        } else if name.eq_ignore_ascii_case("content-disposition") {
            meta.content_disposition = Some(value.to_string());
        }
    }
    meta
}

/// Downloads subtitles from direct http(s) links.
pub struct HttpSource {
    http: HttpConfig,
    max_bytes: u64,
}

impl HttpSource {
    pub fn new(http: HttpConfig, max_bytes: u64) -> Self {
        Self { http, max_bytes }
    }

    pub fn from_config(cfg: &SubgrabConfig) -> Self {
        Self::new(cfg.http(), cfg.max_entry_bytes)
    }

    fn is_direct_link(term: &str) -> bool {
        url::Url::parse(term)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(HttpConfig::default(), DEFAULT_MAX_ENTRY_BYTES)
    }
}

impl SubtitleSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn search(&self, ctx: &SearchContext) -> Result<Vec<SubtitleListItem>> {
        let term = ctx.search_term().trim();
        tracing::info!("searching term: {}", term);
        if !Self::is_direct_link(term) {
            tracing::info!("http source only accepts direct links, got {:?}", term);
            return Ok(Vec::new());
        }
        let file_name = derive_filename(term, None);
        let language = ctx.languages.first().cloned().unwrap_or_default();
        Ok(vec![SubtitleListItem {
            name: classify::display_title(&file_name),
            item_id: term.to_string(),
            time: String::new(),
            language_code: language.clone(),
            language_name: language.clone(),
            language_flag: language,
            rating: 0,
        }])
    }

    fn download(&self, item_id: &str) -> Result<DownloadedBlob> {
        tracing::info!("download url: {}", item_id);
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let max_bytes = self.max_bytes;

        let mut easy = curl::easy::Easy::new();
        easy.url(item_id).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.http.user_agent)?;
        easy.connect_timeout(Duration::from_secs(self.http.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(self.http.timeout_secs))?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if body.len() as u64 + data.len() as u64 > max_bytes {
                    tracing::warn!("download exceeds {} bytes, aborting", max_bytes);
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("GET request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", item_id, code);
        }
        let effective_url = easy
            .effective_url()
            .ok()
            .flatten()
            .unwrap_or(item_id)
            .to_string();

        let meta = parse_headers(&headers);
        let file_name = derive_filename(&effective_url, meta.content_disposition.as_deref());
        let content_length = meta.content_length.unwrap_or(body.len() as u64);
        tracing::debug!(file = %file_name, content_length, "downloaded");

        Ok(DownloadedBlob {
            file_name,
            content_type: meta
                .content_type
                .unwrap_or_else(|| super::guess_content_type(&effective_url).to_string()),
            content_length,
            content: body,
        })
    }
}
