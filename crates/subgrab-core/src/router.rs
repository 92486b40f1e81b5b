//! Plugin request routing: the host calls the plugin with a query string such
//! as `?action=search&languages=English&preferredlanguage=English`.

use std::collections::HashMap;

use url::form_urlencoded;

/// Errors for requests that cannot be routed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("missing parameter {0:?}")]
    MissingParam(&'static str),

    #[error("unknown action {0:?}")]
    UnknownAction(String),
}

/// Parameters of a search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub languages: Vec<String>,
    pub preferred_languages: Vec<String>,
    pub search_string: Option<String>,
}

/// A routed plugin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `search` (automatic) or `manualsearch` (with a search string).
    Search(SearchRequest),
    Download { item_id: String },
}

impl Action {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, RouterError> {
        let action = params
            .get("action")
            .ok_or(RouterError::MissingParam("action"))?;
        match action.as_str() {
            "search" | "manualsearch" => Ok(Action::Search(SearchRequest {
                languages: split_list(params.get("languages")),
                preferred_languages: split_list(params.get("preferredlanguage")),
                search_string: params.get("searchstring").cloned(),
            })),
            "download" => {
                let item_id = params
                    .get("item_id")
                    .ok_or(RouterError::MissingParam("item_id"))?;
                Ok(Action::Download {
                    item_id: item_id.clone(),
                })
            }
            other => Err(RouterError::UnknownAction(other.to_string())),
        }
    }

    pub fn parse(paramstring: &str) -> Result<Self, RouterError> {
        Self::from_params(&param_dict(paramstring))
    }
}

fn split_list(value: Option<&String>) -> Vec<String> {
    value
        .map(|v| v.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Decode a plugin query string into key/value pairs.
///
/// All `?` are removed and one trailing `/` is dropped before decoding. Both
/// percent-encoded and raw UTF-8 values are accepted. Pairs with an empty
/// value are skipped; for repeated keys the last one wins.
pub fn param_dict(paramstring: &str) -> HashMap<String, String> {
    let query = paramstring.replace('?', "");
    let query = query.strip_suffix('/').unwrap_or(&query);
    form_urlencoded::parse(query.as_bytes())
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Query string for a download request of `item_id`.
pub fn download_query(item_id: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("action", "download")
        .append_pair("item_id", item_id)
        .finish()
}
