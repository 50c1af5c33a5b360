//! Outbound search links for a detected disease

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use shared::ResourceLinks;

use crate::error::{AppError, AppResult};

const WEB_SEARCH_URL: &str = "https://www.google.com/search";
const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Characters left verbatim in a query value; spaces become `%20`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Build the fertilizer-shop and management-tips search links for `label`
pub fn resource_links(label: &str) -> AppResult<ResourceLinks> {
    Ok(ResourceLinks {
        fertilizer_search_url: search_url(
            WEB_SEARCH_URL,
            "q",
            &format!("{} fertilizer product shop", label),
        )?,
        management_videos_url: search_url(
            VIDEO_SEARCH_URL,
            "search_query",
            &format!("{} management tips", label),
        )?,
    })
}

fn search_url(base: &str, param: &str, query: &str) -> AppResult<String> {
    let raw = format!(
        "{}?{}={}",
        base,
        param,
        utf8_percent_encode(query, QUERY_VALUE)
    );
    let url = Url::parse(&raw)
        .map_err(|e| AppError::Internal(format!("Invalid search URL {}: {}", base, e)))?;
    Ok(url.into())
}
