//! News-mention heuristic: hits served from news outlets.

use serde::Serialize;

use personscope_shared::SearchHit;

use super::MAX_NEWS;
use super::tables::{NEWS_DOMAINS, NEWS_KEYWORDS};

/// A hit recognized as press coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsMention {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// Up to five hits whose URL looks like a news article.
pub fn extract_news(hits: &[SearchHit]) -> Vec<NewsMention> {
    hits.iter()
        .filter(|hit| is_news_url(&hit.url))
        .take(MAX_NEWS)
        .map(|hit| NewsMention {
            url: hit.url.clone(),
            title: hit.title.clone(),
            snippet: hit.snippet.clone(),
        })
        .collect()
}

fn is_news_url(url: &str) -> bool {
    let url = url.to_lowercase();
    NEWS_DOMAINS
        .iter()
        .chain(NEWS_KEYWORDS)
        .any(|marker| url.contains(marker))
}
