//! Heuristic entity extraction over deduplicated search hits.
//!
//! Five independent extractors, each a pure function of the hit slice:
//! - [`extract_locations`] — at most [`MAX_LOCATIONS`]
//! - [`extract_employers`] — at most [`MAX_EMPLOYERS`]
//! - [`extract_age`] — optional, 18 to 100
//! - [`extract_news`] — at most [`MAX_NEWS`]
//! - [`extract_social_profiles`] — one per platform
//!
//! None of them can fail; no match yields an empty or absent value.

mod age;
mod employer;
mod location;
mod news;
mod social;
pub(crate) mod tables;

use serde::Serialize;

use personscope_shared::SearchHit;

pub use age::{AGE_RANGE, BIRTH_YEAR_RANGE, age_in, extract_age, extract_age_at};
pub use employer::extract_employers;
pub use location::extract_locations;
pub use news::{NewsMention, extract_news};
pub use social::{PLATFORMS, Platform, PlatformSpec, SocialProfile, extract_social_profiles};

pub const MAX_LOCATIONS: usize = 3;
pub const MAX_EMPLOYERS: usize = 5;
pub const MAX_NEWS: usize = 5;

/// Text-derived facts about the searched person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedData {
    pub locations: Vec<String>,
    pub employers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub news: Vec<NewsMention>,
}

/// Run the text extractors over `hits`.
pub fn extract_data(hits: &[SearchHit]) -> ExtractedData {
    ExtractedData {
        locations: extract_locations(hits),
        employers: extract_employers(hits),
        age: extract_age(hits),
        news: extract_news(hits),
    }
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Bounded, order-preserving, case-insensitively deduplicated string list.
pub(crate) struct Collector {
    items: Vec<String>,
    cap: usize,
    min_chars: usize,
    max_chars: usize,
    key: fn(&str) -> String,
}

impl Collector {
    pub(crate) fn new(cap: usize, min_chars: usize, max_chars: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            cap,
            min_chars,
            max_chars,
            key: str::to_lowercase,
        }
    }

    /// Compare candidates by `key` instead of their lowercased text.
    pub(crate) fn with_key(mut self, key: fn(&str) -> String) -> Self {
        self.key = key;
        self
    }

    /// Add a trimmed candidate unless it is out of bounds, seen, or the list is full.
    pub(crate) fn push(&mut self, candidate: &str) {
        if self.is_full() {
            return;
        }
        let candidate = candidate.trim();
        let len = candidate.chars().count();
        if len < self.min_chars || len > self.max_chars {
            return;
        }
        let key = (self.key)(candidate);
        if self.items.iter().any(|s| (self.key)(s) == key) {
            return;
        }
        self.items.push(candidate.to_string());
    }

    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
pub(crate) fn test_hit(url: &str, title: &str, snippet: &str) -> SearchHit {
    SearchHit {
        url: url.into(),
        title: title.into(),
        snippet: snippet.into(),
        category: personscope_shared::Category::General,
        simulated: false,
    }
}
